// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Passages are the only source of truth; links and edges are derived from their text.

pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod link;
pub mod passage;

pub use edge::{Edge, EdgeKind, ParseEdgeKindError};
pub use ids::{ParsePassageIdError, PassageId};
pub use link::Link;
pub use passage::{Connections, Passage, PassagePatch, Position, UNTITLED_PASSAGE_NAME};
