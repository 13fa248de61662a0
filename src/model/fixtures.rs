// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Passage, PassageId, Position};
use crate::store::PassageStore;

pub(crate) fn pid(value: u32) -> PassageId {
    PassageId::new(value)
}

/// Builds a store from `(name, text)` pairs; ids start at 1 and cards sit on a diagonal.
pub(crate) fn story(passages: &[(&str, Option<&str>)]) -> PassageStore {
    let passages = passages
        .iter()
        .enumerate()
        .map(|(index, (name, text))| {
            let id = index as u32 + 1;
            let offset = 125.0 * f64::from(id);
            Passage::new(pid(id), *name, text.map(ToOwned::to_owned), Position::new(offset, offset))
        })
        .collect();
    PassageStore::from_passages(passages).expect("fixture ids are unique")
}

pub(crate) fn ping_pong() -> PassageStore {
    story(&[("A", Some("go to [[B]]")), ("B", Some("back to [[A]]"))])
}

pub(crate) fn branching() -> PassageStore {
    story(&[
        ("Start", Some("[[Left]] or [[Right]]")),
        ("Left", Some("[[Go back->Start]] [[End]]")),
        ("Right", Some("[[End]] [[End]] [[Right]]")),
        ("End", Some("The end.")),
    ])
}
