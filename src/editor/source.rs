// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Contract with the external text editor that edits the active passage.

/// A text widget showing one passage at a time.
pub trait SourceEditor {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// The graph pushed text into the editor.
    Programmatic,
    /// The user typed.
    User,
}

/// Change notification coming back from the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub text: String,
    pub origin: ChangeOrigin,
}

impl TextChange {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ChangeOrigin::User,
        }
    }

    pub fn programmatic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ChangeOrigin::Programmatic,
        }
    }
}
