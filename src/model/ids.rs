// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable numeric identifier of a passage.
///
/// Ids are issued by the store (or carried over from an imported `pid`) and are never reused
/// within a session. Interchange formats carry them as decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassageId(u32);

impl PassageId {
    pub const FIRST: Self = Self(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The following id, or `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Writes the id as a decimal string without going through `fmt`.
    pub fn to_decimal(self) -> String {
        let mut buf = itoa::Buffer::new();
        buf.format(self.0).to_owned()
    }
}

impl fmt::Display for PassageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PassageId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePassageIdError {
    value: String,
    source: ParseIntError,
}

impl ParsePassageIdError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParsePassageIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid passage id {:?}: {}", self.value, self.source)
    }
}

impl std::error::Error for ParsePassageIdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl FromStr for PassageId {
    type Err = ParsePassageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|source| ParsePassageIdError { value: s.to_owned(), source })
    }
}
