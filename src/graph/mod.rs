// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge building.
//!
//! Turns passage text into the classified edge set and refreshes each passage's cached
//! `connections` along the way.

use std::collections::HashSet;

use crate::format::extract_links;
use crate::model::{Connections, Edge, EdgeKind, PassageId};
use crate::store::PassageStore;

/// Classified edges in emission order: passages in store order, targets in link order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: Vec<Edge>,
}

impl EdgeSet {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Kind of the edge joining `a` and `b`, looking in both directions.
    pub fn kind_between(&self, a: PassageId, b: PassageId) -> Option<EdgeKind> {
        self.edges
            .iter()
            .find(|edge| edge.connects(a, b) || edge.connects(b, a))
            .map(Edge::kind)
    }

    pub fn touching(&self, id: PassageId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |edge| edge.touches(id))
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Resolves each passage's links to target ids, deduplicated in first-occurrence order.
///
/// Targets that name no passage are dropped; they only show up in diagnostics.
pub fn resolve_connections(store: &PassageStore) -> Vec<Connections> {
    store
        .all()
        .iter()
        .map(|passage| {
            let mut connections = Connections::new();
            for link in extract_links(passage.text_or_empty()) {
                let Some(target) = store.id_for_name(link.target()) else {
                    continue;
                };
                if !connections.contains(&target) {
                    connections.push(target);
                }
            }
            connections
        })
        .collect()
}

/// Rebuilds every passage's `connections` and returns the classified edge set.
pub fn build_edges(store: &mut PassageStore) -> EdgeSet {
    let resolved = resolve_connections(store);
    for (passage, connections) in store.passages_mut().iter_mut().zip(resolved) {
        passage.set_connections(connections);
    }

    let edges = classify(store);
    tracing::debug!(passages = store.len(), edges = edges.len(), "rebuilt edge set");
    edges
}

/// Classifies the cached connections without re-parsing text.
pub fn classify(store: &PassageStore) -> EdgeSet {
    let raw_pairs = store
        .all()
        .iter()
        .flat_map(|passage| passage.connections().iter().map(move |to| (passage.id(), *to)))
        .collect::<HashSet<_>>();

    let mut edges = Vec::with_capacity(raw_pairs.len());
    for passage in store.all() {
        let from = passage.id();
        for &to in passage.connections() {
            if from == to {
                edges.push(Edge::self_loop(from));
            } else if raw_pairs.contains(&(to, from)) {
                // Emitted once, from the lower id's side.
                if from < to {
                    edges.push(Edge::bidirectional(from, to));
                }
            } else {
                edges.push(Edge::directed(from, to));
            }
        }
    }

    EdgeSet { edges }
}
