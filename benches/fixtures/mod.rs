// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use quilt::format::export_json;
use quilt::model::{Passage, PassageId, Position};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn passages(self) -> u32 {
        match self {
            Self::Small => 16,
            Self::Medium => 128,
            Self::Large => 512,
        }
    }
}

const COLUMNS: u32 = 16;
const STEP: f64 = 125.0;

fn passage_name(index: u32) -> String {
    format!("Room {index}")
}

/// Each passage links forward twice and back once; every seventh links to itself and every
/// eleventh points at a passage that does not exist.
fn passage_text(index: u32, total: u32) -> String {
    let mut text = format!("Room {index} of {total}.");
    for target in [index + 1, index + 2] {
        if target <= total {
            text.push_str(&format!(" Go to [[{}]].", passage_name(target)));
        }
    }
    if index > 1 {
        text.push_str(&format!(" [[Back->{}]]", passage_name(index - 1)));
    }
    if index % 7 == 0 {
        text.push_str(&format!(" [[{}]]", passage_name(index)));
    }
    if index % 11 == 0 {
        text.push_str(" [[Nowhere]]");
    }
    text
}

pub fn passages(case: Case) -> Vec<Passage> {
    let total = case.passages();
    (1..=total)
        .map(|index| {
            let column = (index - 1) % COLUMNS;
            let row = (index - 1) / COLUMNS;
            Passage::new(
                PassageId::new(index),
                passage_name(index),
                Some(passage_text(index, total)),
                Position::new(f64::from(column) * STEP, f64::from(row) * STEP),
            )
        })
        .collect()
}

pub fn json(case: Case) -> String {
    export_json(&passages(case)).expect("export fixture story")
}
