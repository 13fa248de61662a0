// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Twee stories.
//!
//! Passages are numbered `1..=N` in story order on import. A passage's `metadata.position` is
//! an `"x,y"` string; passages without one are placed on the diagonal at `grid * id`.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::model::{Passage, PassageId, Position};

const STORY_TITLE: &str = "StoryTitle";
const STORY_DATA: &str = "StoryData";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweeStory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub passages: Vec<TweePassage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweePassage {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: TweeMetadata,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweeMetadata {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^::\s*(?P<name>.*?)\s*(?:\[(?P<tags>[^\]]*)\])?\s*(?P<meta>\{.*\})?\s*$")
            .expect("valid twee header pattern")
    })
}

struct OpenPassage {
    line: usize,
    name: String,
    tags: Vec<String>,
    metadata: TweeMetadata,
    body: Vec<String>,
}

impl OpenPassage {
    fn finish(self, story: &mut TweeStory) {
        let text = self.body.join("\n").trim_end().to_owned();
        match self.name.as_str() {
            STORY_TITLE => story.name = Some(text.trim().to_owned()),
            STORY_DATA => tracing::debug!(line = self.line, "skipping story data block"),
            _ => story.passages.push(TweePassage {
                name: self.name,
                tags: self.tags,
                metadata: self.metadata,
                text,
            }),
        }
    }
}

/// Reads Twee 3 source: `:: Name [tags] {"position":"x,y"}` headers followed by passage text.
///
/// Text before the first header is ignored. `StoryTitle` sets the story name and `StoryData`
/// is skipped; neither becomes a passage.
pub fn parse_twee(src: &str) -> Result<TweeStory, FormatError> {
    let mut story = TweeStory::default();
    let mut current: Option<OpenPassage> = None;

    for (index, line) in src.lines().enumerate() {
        let line_no = index + 1;
        if !line.starts_with("::") {
            if let Some(open) = current.as_mut() {
                open.body.push(line.to_owned());
            }
            continue;
        }

        if let Some(done) = current.take() {
            done.finish(&mut story);
        }
        current = Some(parse_header(line, line_no)?);
    }

    if let Some(done) = current.take() {
        done.finish(&mut story);
    }
    Ok(story)
}

fn parse_header(line: &str, line_no: usize) -> Result<OpenPassage, FormatError> {
    let syntax = |message: String| FormatError::TweeSyntax { line: line_no, message };

    let caps = header_regex()
        .captures(line)
        .ok_or_else(|| syntax("malformed passage header".to_owned()))?;

    let name = caps.name("name").map(|m| m.as_str()).unwrap_or_default();
    if name.is_empty() {
        return Err(syntax("passage header without a name".to_owned()));
    }

    let tags = caps
        .name("tags")
        .map(|m| m.as_str().split_whitespace().map(ToOwned::to_owned).collect())
        .unwrap_or_default();

    let metadata = match caps.name("meta") {
        Some(meta) => serde_json::from_str(meta.as_str())
            .map_err(|err| syntax(format!("invalid passage metadata: {err}")))?,
        None => TweeMetadata::default(),
    };

    Ok(OpenPassage {
        line: line_no,
        name: name.to_owned(),
        tags,
        metadata,
        body: Vec::new(),
    })
}

fn parse_position(raw: &str) -> Option<Position> {
    let (x, y) = raw.split_once(',')?;
    let x: f64 = x.trim().parse().ok()?;
    let y: f64 = y.trim().parse().ok()?;
    (x.is_finite() && y.is_finite()).then(|| Position::new(x, y))
}

/// Builds passages numbered from 1 in story order, with positions snapped to `grid`.
pub fn import_twee_story(story: &TweeStory, grid: f64) -> Result<Vec<Passage>, FormatError> {
    let mut passages = Vec::with_capacity(story.passages.len());

    for (id, entry) in (1..=u32::MAX).map(PassageId::new).zip(&story.passages) {
        let position = match entry.metadata.position.as_deref() {
            Some(raw) => parse_position(raw).ok_or_else(|| FormatError::InvalidPosition {
                passage: entry.name.clone(),
                value: raw.to_owned(),
            })?,
            None => {
                let diagonal = grid * f64::from(id.get());
                Position::new(diagonal, diagonal)
            }
        };

        passages.push(Passage::new(
            id,
            entry.name.clone(),
            Some(entry.text.clone()),
            position.snapped(grid),
        ));
    }

    Ok(passages)
}
