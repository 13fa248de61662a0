// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

/// One `[[label -> target]]` cross-reference found in passage text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    label: SmolStr,
    target: SmolStr,
}

impl Link {
    pub fn new(label: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        Self { label: label.into(), target: target.into() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the passage this link points at.
    pub fn target(&self) -> &str {
        &self.target
    }
}
