// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Story health report.
//!
//! Nothing here mutates the store; corrections live on the editor facade.

use serde::Serialize;

use crate::format::extract_links;
use crate::model::{Passage, PassageId, UNTITLED_PASSAGE_NAME};
use crate::store::PassageStore;

/// Names that mark a passage as never having been named properly. Empty names count too.
pub const BAD_NAMES: [&str; 3] = [UNTITLED_PASSAGE_NAME, "Untitled Passage", "null"];

pub fn is_bad_name(name: &str) -> bool {
    name.is_empty() || BAD_NAMES.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassageSummary {
    pub id: PassageId,
    pub name: String,
}

impl From<&Passage> for PassageSummary {
    fn from(passage: &Passage) -> Self {
        Self {
            id: passage.id(),
            name: passage.name().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Passages with absent or empty text.
    pub empty: Vec<PassageSummary>,
    pub bad_names: Vec<PassageSummary>,
    /// Passages with at least one link to a name no passage has.
    pub deadend_passages: Vec<PassageSummary>,
    /// Every unresolved target, in passage then link order.
    pub deadends: Vec<String>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.empty.is_empty()
            && self.bad_names.is_empty()
            && self.deadend_passages.is_empty()
            && self.deadends.is_empty()
    }
}

pub fn evaluate(store: &PassageStore) -> Report {
    let mut report = Report::default();

    for passage in store.all() {
        if passage.is_placeholder() {
            report.empty.push(passage.into());
        }
        if is_bad_name(passage.name()) {
            report.bad_names.push(passage.into());
        }

        let missing = extract_links(passage.text_or_empty())
            .into_iter()
            .filter(|link| store.by_name(link.target()).is_none())
            .map(|link| link.target().to_owned())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            report.deadend_passages.push(passage.into());
            report.deadends.extend(missing);
        }
    }

    tracing::debug!(
        empty = report.empty.len(),
        bad_names = report.bad_names.len(),
        deadends = report.deadends.len(),
        "evaluated story"
    );
    report
}
