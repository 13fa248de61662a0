// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON story files.
//!
//! ```json
//! { "passages": [ { "text": "...", "links": [{"name": "...", "link": "..."}],
//!                   "name": "...", "pid": "1", "position": {"x": "0", "y": "0"} } ] }
//! ```
//!
//! `pid` and the coordinates are written as strings; on import both strings and numbers are
//! accepted. `links` is informational and ignored on import.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{extract_links, FormatError};
use crate::model::{Passage, PassageId, Position};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonStory {
    #[serde(default)]
    pub passages: Vec<JsonPassage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPassage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub links: Vec<JsonLink>,
    #[serde(default)]
    pub name: String,
    pub pid: JsonScalar,
    pub position: JsonPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonLink {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPosition {
    pub x: JsonScalar,
    pub y: JsonScalar,
}

/// A value that may arrive as a JSON number or as a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonScalar {
    Number(serde_json::Number),
    Text(String),
}

impl JsonScalar {
    fn raw(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }

    fn as_pid(&self) -> Option<PassageId> {
        match self {
            Self::Number(number) => number
                .as_u64()
                .and_then(|value| u32::try_from(value).ok())
                .map(PassageId::new),
            Self::Text(text) => text.parse().ok(),
        }
    }

    fn as_coordinate(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => number.as_f64()?,
            Self::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl JsonStory {
    /// Validates ids and coordinates and builds passages with positions snapped to `grid`.
    pub fn into_passages(self, grid: f64) -> Result<Vec<Passage>, FormatError> {
        let mut seen = HashSet::with_capacity(self.passages.len());
        let mut passages = Vec::with_capacity(self.passages.len());

        for (index, entry) in self.passages.into_iter().enumerate() {
            let id = entry.pid.as_pid().ok_or_else(|| FormatError::InvalidPid {
                index,
                value: entry.pid.raw(),
            })?;
            if !seen.insert(id) {
                return Err(FormatError::DuplicatePid { id });
            }

            let x = entry.position.x.as_coordinate();
            let y = entry.position.y.as_coordinate();
            let (Some(x), Some(y)) = (x, y) else {
                return Err(FormatError::InvalidPosition {
                    value: format!("{},{}", entry.position.x.raw(), entry.position.y.raw()),
                    passage: entry.name,
                });
            };

            passages.push(Passage::new(
                id,
                entry.name,
                entry.text,
                Position::new(x, y).snapped(grid),
            ));
        }

        Ok(passages)
    }

    pub fn from_passages(passages: &[Passage]) -> Self {
        let passages = passages
            .iter()
            .map(|passage| {
                let links = extract_links(passage.text_or_empty())
                    .into_iter()
                    .map(|link| JsonLink {
                        name: link.label().to_owned(),
                        link: link.target().to_owned(),
                    })
                    .collect();
                let position = passage.position();
                JsonPassage {
                    text: passage.text().map(ToOwned::to_owned),
                    links,
                    name: passage.name().to_owned(),
                    pid: JsonScalar::Text(passage.id().to_decimal()),
                    position: JsonPosition {
                        x: JsonScalar::Text(position.x.to_string()),
                        y: JsonScalar::Text(position.y.to_string()),
                    },
                }
            })
            .collect();
        Self { passages }
    }
}

pub fn import_json(src: &str, grid: f64) -> Result<Vec<Passage>, FormatError> {
    let story: JsonStory = serde_json::from_str(src)?;
    story.into_passages(grid)
}

/// Pretty-printed JSON story. Links are re-extracted from each passage's text.
pub fn export_json(passages: &[Passage]) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&JsonStory::from_passages(passages))?)
}
