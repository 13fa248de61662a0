// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::PassageId;

/// Derived connection between two passages.
///
/// Edges are rebuilt from passage text and never persisted. A bidirectional pair is stored
/// once with `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    from: PassageId,
    to: PassageId,
    kind: EdgeKind,
}

impl Edge {
    pub fn new(from: PassageId, to: PassageId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }

    pub fn directed(from: PassageId, to: PassageId) -> Self {
        Self::new(from, to, EdgeKind::Directed)
    }

    /// Builds the single edge for a reciprocal pair, keyed by the ascending ids.
    pub fn bidirectional(a: PassageId, b: PassageId) -> Self {
        Self::new(a.min(b), a.max(b), EdgeKind::Bidirectional)
    }

    pub fn self_loop(id: PassageId) -> Self {
        Self::new(id, id, EdgeKind::SelfLoop)
    }

    pub fn from(&self) -> PassageId {
        self.from
    }

    pub fn to(&self) -> PassageId {
        self.to
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn touches(&self, id: PassageId) -> bool {
        self.from == id || self.to == id
    }

    /// True when the edge links `a` and `b` in the direction(s) its kind implies.
    pub fn connects(&self, a: PassageId, b: PassageId) -> bool {
        match self.kind {
            EdgeKind::Directed | EdgeKind::SelfLoop => self.from == a && self.to == b,
            EdgeKind::Bidirectional => {
                (self.from == a && self.to == b) || (self.from == b && self.to == a)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Directed,
    Bidirectional,
    SelfLoop,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Bidirectional => "bidirectional",
            Self::SelfLoop => "self_loop",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEdgeKindError;

impl fmt::Display for ParseEdgeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid edge kind")
    }
}

impl std::error::Error for ParseEdgeKindError {}

impl FromStr for EdgeKind {
    type Err = ParseEdgeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directed" => Ok(Self::Directed),
            "bidirectional" => Ok(Self::Bidirectional),
            "self_loop" => Ok(Self::SelfLoop),
            _ => Err(ParseEdgeKindError),
        }
    }
}
