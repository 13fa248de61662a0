// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Geometry and connector paths for drawing the story graph.
//!
//! Nothing here touches a drawing surface; callers get coordinates and SVG path data.

pub mod connector;
pub mod geometry;

pub use connector::{card_center, route_connector, route_connectors, ArrowMarker, Connector, ConnectorShape};
pub use geometry::{CubicBezier, LoopArc, Point, Rect, Size};
