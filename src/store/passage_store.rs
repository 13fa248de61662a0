// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::model::{Passage, PassageId, PassagePatch, Position, UNTITLED_PASSAGE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound { id: PassageId },
    DuplicateId { id: PassageId },
    /// A passage already holds the largest representable id.
    IdsExhausted,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "passage not found (id={id})"),
            Self::DuplicateId { id } => write!(f, "duplicate passage id (id={id})"),
            Self::IdsExhausted => write!(f, "no passage ids left (highest id is {})", u32::MAX),
        }
    }
}

impl std::error::Error for StoreError {}

/// Owns every passage of the story, in insertion order.
///
/// Name lookups go through an explicit `name -> id` index. Names are not required to be
/// unique; when several passages share a name the index keeps the first one in insertion
/// order, and that passage is the one links resolve to.
#[derive(Debug, Clone, Default)]
pub struct PassageStore {
    passages: Vec<Passage>,
    name_index: HashMap<String, PassageId>,
    highest_issued: u32,
}

impl PassageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_passages(passages: Vec<Passage>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.replace_all(passages)?;
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn all(&self) -> &[Passage] {
        &self.passages
    }

    pub fn ids(&self) -> impl Iterator<Item = PassageId> + '_ {
        self.passages.iter().map(Passage::id)
    }

    pub fn contains(&self, id: PassageId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn by_id(&self, id: PassageId) -> Option<&Passage> {
        self.passages.iter().find(|p| p.id() == id)
    }

    /// First passage (insertion order) named `name`.
    pub fn by_name(&self, name: &str) -> Option<&Passage> {
        let id = *self.name_index.get(name)?;
        self.by_id(id)
    }

    pub fn id_for_name(&self, name: &str) -> Option<PassageId> {
        self.name_index.get(name).copied()
    }

    /// The id the next `create` will use: one past the highest id seen this session. `None`
    /// when that id would not fit in a `u32`.
    pub fn next_id(&self) -> Option<PassageId> {
        let current_max = self.passages.iter().map(|p| p.id().get()).max().unwrap_or(0);
        PassageId::new(current_max.max(self.highest_issued)).next()
    }

    pub fn create(
        &mut self,
        name: Option<String>,
        text: Option<String>,
        position: Position,
    ) -> Result<&Passage, StoreError> {
        let id = self.next_id().ok_or(StoreError::IdsExhausted)?;
        let name = name.unwrap_or_else(|| UNTITLED_PASSAGE_NAME.to_owned());
        self.highest_issued = id.get();
        self.name_index.entry(name.clone()).or_insert(id);
        self.passages.push(Passage::new(id, name, text, position));
        Ok(&self.passages[self.passages.len() - 1])
    }

    /// First free grid cell at or to the right of `start` on the same row.
    pub fn free_cell_near(&self, start: Position, grid: f64) -> Position {
        let taken = self.passages.iter().map(|p| cell_key(p.position())).collect::<HashSet<_>>();
        let mut candidate = start;
        while taken.contains(&cell_key(candidate)) {
            candidate = candidate.offset(grid, 0.0);
        }
        candidate
    }

    pub fn update(&mut self, id: PassageId, patch: PassagePatch) -> Result<&Passage, StoreError> {
        let index = self.index_of(id).ok_or(StoreError::NotFound { id })?;
        let renames = patch.renames();
        {
            let passage = &mut self.passages[index];
            if let Some(name) = patch.name {
                passage.set_name(name);
            }
            if let Some(text) = patch.text {
                passage.set_text(Some(text));
            }
            if let Some(position) = patch.position {
                passage.set_position(position);
            }
        }
        if renames {
            self.rebuild_name_index();
        }
        Ok(&self.passages[index])
    }

    pub fn set_position(&mut self, id: PassageId, position: Position) -> Result<(), StoreError> {
        let index = self.index_of(id).ok_or(StoreError::NotFound { id })?;
        self.passages[index].set_position(position);
        Ok(())
    }

    /// Removes the passage and hands back the removed record.
    pub fn delete(&mut self, id: PassageId) -> Result<Passage, StoreError> {
        let index = self.index_of(id).ok_or(StoreError::NotFound { id })?;
        let removed = self.passages.remove(index);
        self.rebuild_name_index();
        Ok(removed)
    }

    /// Name-keyed delete; an unknown name is logged and ignored.
    pub fn delete_by_name(&mut self, name: &str) -> Option<Passage> {
        let Some(id) = self.id_for_name(name) else {
            tracing::warn!(name, "no passage found to delete");
            return None;
        };
        self.delete(id).ok()
    }

    /// Replaces the whole passage set. Duplicate ids are rejected before anything changes.
    pub fn replace_all(&mut self, passages: Vec<Passage>) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(passages.len());
        for passage in &passages {
            if !seen.insert(passage.id()) {
                return Err(StoreError::DuplicateId { id: passage.id() });
            }
        }

        self.highest_issued = passages.iter().map(|p| p.id().get()).max().unwrap_or(0);
        self.passages = passages;
        self.rebuild_name_index();
        Ok(())
    }

    pub(crate) fn passages_mut(&mut self) -> &mut [Passage] {
        &mut self.passages
    }

    fn index_of(&self, id: PassageId) -> Option<usize> {
        self.passages.iter().position(|p| p.id() == id)
    }

    fn rebuild_name_index(&mut self) {
        self.name_index.clear();
        for passage in &self.passages {
            self.name_index.entry(passage.name().to_owned()).or_insert(passage.id());
        }
    }
}

fn cell_key(position: Position) -> (u64, u64) {
    // `+ 0.0` folds -0.0 into 0.0 so both land in the same cell.
    ((position.x + 0.0).to_bits(), (position.y + 0.0).to_bits())
}
