// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Connector routing: one drawable path per edge.

use crate::config::GraphConfig;
use crate::graph::EdgeSet;
use crate::model::{Edge, EdgeKind, PassageId, Position};
use crate::store::PassageStore;

use super::geometry::{curved_connector, self_loop_arc, CubicBezier, LoopArc, Point};

/// Arrowhead drawn at a connector end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowMarker {
    /// Points along the path direction.
    Forward,
    /// Points against the path direction; used at path starts and at loop tips.
    Reverse,
}

impl ArrowMarker {
    pub const PATH_DATA: &'static str = "M1,1 L7,4 L1,7 Z";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "arrow-end",
            Self::Reverse => "arrow-start",
        }
    }

    /// SVG `orient` attribute for the marker definition.
    pub fn orient(self) -> &'static str {
        match self {
            Self::Forward => "auto",
            Self::Reverse => "auto-start-reverse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectorShape {
    Curve(CubicBezier),
    Loop(LoopArc),
}

impl ConnectorShape {
    pub fn path_data(&self) -> String {
        match self {
            Self::Curve(curve) => curve.path_data(),
            Self::Loop(arc) => arc.path_data(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    edge: Edge,
    shape: ConnectorShape,
    marker_start: Option<ArrowMarker>,
    marker_end: Option<ArrowMarker>,
}

impl Connector {
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn from(&self) -> PassageId {
        self.edge.from()
    }

    pub fn to(&self) -> PassageId {
        self.edge.to()
    }

    pub fn kind(&self) -> EdgeKind {
        self.edge.kind()
    }

    pub fn shape(&self) -> &ConnectorShape {
        &self.shape
    }

    pub fn marker_start(&self) -> Option<ArrowMarker> {
        self.marker_start
    }

    pub fn marker_end(&self) -> Option<ArrowMarker> {
        self.marker_end
    }

    pub fn path_data(&self) -> String {
        self.shape.path_data()
    }
}

pub fn card_center(position: Position, card_size: f64) -> Point {
    let half = card_size / 2.0;
    Point::new(position.x + half, position.y + half)
}

/// Path for a single edge. `None` when an endpoint is missing or two distinct cards overlap
/// exactly.
pub fn route_connector(store: &PassageStore, edge: Edge, config: &GraphConfig) -> Option<Connector> {
    let from = card_center(store.by_id(edge.from())?.position(), config.card_size);

    let (shape, marker_start, marker_end) = match edge.kind() {
        EdgeKind::SelfLoop => (
            ConnectorShape::Loop(self_loop_arc(from, config.self_loop_radius, config.self_loop_lift)),
            None,
            Some(ArrowMarker::Reverse),
        ),
        kind => {
            let to = card_center(store.by_id(edge.to())?.position(), config.card_size);
            let curve = curved_connector(from, to, config.card_size, config.curve_intensity)?;
            let marker_start = (kind == EdgeKind::Bidirectional).then_some(ArrowMarker::Reverse);
            (ConnectorShape::Curve(curve), marker_start, Some(ArrowMarker::Forward))
        }
    };

    Some(Connector {
        edge,
        shape,
        marker_start,
        marker_end,
    })
}

/// Paths for every edge in `edges`, in edge order. Edges that cannot be drawn are skipped.
pub fn route_connectors(store: &PassageStore, edges: &EdgeSet, config: &GraphConfig) -> Vec<Connector> {
    let mut connectors = Vec::with_capacity(edges.len());
    for edge in edges {
        match route_connector(store, *edge, config) {
            Some(connector) => connectors.push(connector),
            None => tracing::debug!(
                from = edge.from().get(),
                to = edge.to().get(),
                "skipping connector between overlapping cards"
            ),
        }
    }
    connectors
}
