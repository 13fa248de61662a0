// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Quilt: the engine behind a visual editor for linked story passages.
//!
//! Passages live in a [`store::PassageStore`]; their `[[links]]` become a classified
//! [`graph::EdgeSet`] drawn as curved connectors by [`render`]. [`editor::QuiltGraph`] ties the
//! store to the viewport, pointer gestures, notifications and the story file formats.

pub mod config;
pub mod diagnostics;
pub mod editor;
pub mod events;
pub mod format;
pub mod graph;
pub mod interaction;
pub mod model;
pub mod render;
pub mod store;
pub mod viewport;

pub use config::{ConfigError, GraphConfig};
pub use editor::{GraphError, QuiltGraph};
