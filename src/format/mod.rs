// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Story interchange.
//!
//! Two import schemas share one logical passage shape: the JSON story file (schema A) and the
//! Twee story (schema B, either as a parsed object or as Twee 3 text). Export always writes the
//! JSON schema.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::model::PassageId;

pub mod json;
pub mod links;
pub mod twee;

pub use json::{export_json, import_json, JsonPassage, JsonPosition, JsonStory};
pub use links::{extract_links, has_links};
pub use twee::{import_twee_story, parse_twee, TweeMetadata, TweePassage, TweeStory};

/// Export name used when no file has been opened.
pub const DEFAULT_EXPORT_BASE: &str = "story";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Json,
    Twee,
}

impl SourceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Twee => "twee",
        }
    }

    /// Picks the format from a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Result<Self, FormatError> {
        extension.parse()
    }

    /// Picks the format from the text after the last `.` of the file name.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
        let extension = file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
        Self::from_extension(extension)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "twee" => Ok(Self::Twee),
            _ => Err(FormatError::UnsupportedFileType { extension: s.to_owned() }),
        }
    }
}

#[derive(Debug)]
pub enum FormatError {
    Json { source: serde_json::Error },
    InvalidPid { index: usize, value: String },
    DuplicatePid { id: PassageId },
    InvalidPosition { passage: String, value: String },
    TweeSyntax { line: usize, message: String },
    UnsupportedFileType { extension: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "invalid story json: {source}"),
            Self::InvalidPid { index, value } => {
                write!(f, "invalid pid {value:?} for passage #{index}")
            }
            Self::DuplicatePid { id } => write!(f, "duplicate pid (id={id})"),
            Self::InvalidPosition { passage, value } => {
                write!(f, "invalid position {value:?} for passage {passage:?}")
            }
            Self::TweeSyntax { line, message } => write!(f, "twee syntax error at line {line}: {message}"),
            Self::UnsupportedFileType { extension } => {
                write!(f, "unsupported file type: {extension:?}")
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

/// Base name of an opened file: everything before its first `.`.
///
/// Falls back to [`DEFAULT_EXPORT_BASE`] when that part is empty.
pub fn export_base_name(file_name: &str) -> &str {
    let base = file_name.split('.').next().unwrap_or_default();
    if base.is_empty() {
        DEFAULT_EXPORT_BASE
    } else {
        base
    }
}

/// A serialised story ready to be handed to a download or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    contents: String,
}

impl ExportArtifact {
    pub fn new(base_name: &str, contents: String) -> Self {
        Self {
            file_name: format!("{base_name}.json"),
            contents,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn media_type(&self) -> &'static str {
        "application/json"
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type(), STANDARD.encode(&self.contents))
    }
}
