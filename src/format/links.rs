// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Link markup extraction.
//!
//! A link is `[[inner]]` where `inner` is at least one character and contains no `]`.
//! `inner` may be `label -> target`; without the arrow the label is also the target.

use memchr::memchr;
use memchr::memmem::Finder;

use crate::model::Link;

const LINK_ARROW: &str = "->";

/// Every link in `text`, in document order.
///
/// Malformed or unterminated markup is skipped. Each attempt moves the cursor forward, so the
/// scan terminates on any input.
pub fn extract_links(text: &str) -> Vec<Link> {
    let bytes = text.as_bytes();
    let opener = Finder::new(b"[[");
    let mut links = Vec::new();
    let mut cursor = 0;

    while let Some(found) = opener.find(&bytes[cursor..]) {
        let open = cursor + found;
        let inner_start = open + 2;
        let Some(inner_len) = memchr(b']', &bytes[inner_start..]) else {
            // No closing bracket anywhere after this point.
            break;
        };

        let close = inner_start + inner_len;
        if inner_len > 0 && bytes.get(close + 1) == Some(&b']') {
            links.push(parse_link_body(&text[inner_start..close]));
            cursor = close + 2;
        } else {
            cursor = open + 1;
        }
    }

    links
}

/// True when `text` contains at least one well-formed link.
pub fn has_links(text: &str) -> bool {
    !extract_links(text).is_empty()
}

fn parse_link_body(inner: &str) -> Link {
    let mut parts = inner.trim().split(LINK_ARROW).map(str::trim);
    let label = parts.next().unwrap_or_default();
    let target = parts.next().filter(|target| !target.is_empty()).unwrap_or(label);
    Link::new(label, target)
}
