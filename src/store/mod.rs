// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Passage storage.
//!
//! The store owns passages and their name index; everything else (edges, connectors,
//! diagnostics) is derived from it.

pub mod passage_store;

pub use passage_store::{PassageStore, StoreError};
