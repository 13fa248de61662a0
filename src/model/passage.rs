// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::ids::PassageId;

/// Name given to passages created without an explicit name.
pub const UNTITLED_PASSAGE_NAME: &str = "untitled";

/// A point in model space. Passage positions are kept on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn snapped(self, grid: f64) -> Self {
        Self {
            x: crate::render::geometry::snap_to_grid(self.x, grid),
            y: crate::render::geometry::snap_to_grid(self.y, grid),
        }
    }
}

/// Ordered set of resolved link targets for one passage.
pub type Connections = SmallVec<[PassageId; 4]>;

/// One node of the story graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    id: PassageId,
    name: String,
    text: Option<String>,
    position: Position,
    connections: Connections,
}

impl Passage {
    pub fn new(
        id: PassageId,
        name: impl Into<String>,
        text: Option<String>,
        position: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            text,
            position,
            connections: Connections::new(),
        }
    }

    pub fn id(&self) -> PassageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Text or the empty string, for callers that only read link markup.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Placeholder passages have no body yet; they usually exist only because something links
    /// to them.
    pub fn is_placeholder(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Cached result of the last edge build.
    pub fn connections(&self) -> &[PassageId] {
        &self.connections
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_connections(&mut self, connections: Connections) {
        self.connections = connections;
    }
}

/// Partial update for a passage; only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassagePatch {
    pub name: Option<String>,
    pub text: Option<String>,
    pub position: Option<Position>,
}

impl PassagePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }

    pub fn position(position: Position) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.text.is_none() && self.position.is_none()
    }

    pub fn renames(&self) -> bool {
        self.name.is_some()
    }
}
