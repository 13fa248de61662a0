// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pure geometry for cards and connectors. No state.

use std::fmt::Write as _;

/// Where along the chord the two Bezier control points sit.
const CONTROL_NEAR: f64 = 0.3;
const CONTROL_FAR: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self { width: side, height: side }
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalised rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overlap test; touching edges count as a hit.
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Rounds `value` to the nearest multiple of `grid` (halves round up).
///
/// Snapping a value that is already on the grid returns it unchanged. A non-positive grid
/// disables snapping.
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if !(grid > 0.0) || !value.is_finite() {
        return value;
    }
    (value / grid + 0.5).floor() * grid
}

/// Largest multiple of `grid` that does not exceed `value`.
pub fn floor_to_grid(value: f64, grid: f64) -> f64 {
    if !(grid > 0.0) || !value.is_finite() {
        return value;
    }
    (value / grid).floor() * grid
}

/// Clamps into `[0, max]`; a negative `max` pins to 0.
pub fn clamp_to_extent(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}

/// Points where the segment between two card centers leaves each card.
///
/// Both cards share the same half extents. Returns `None` when the centers coincide.
pub fn anchor_points(from: Point, to: Point, half: Size) -> Option<(Point, Point)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    // x / 0.0 is +inf, so an axis-aligned segment falls through to the other axis.
    let t = (half.width / dx.abs()).min(half.height / dy.abs());
    let start = Point::new(from.x + dx * t, from.y + dy * t);
    let end = Point::new(to.x - dx * t, to.y - dy * t);
    Some((start, end))
}

/// Vector of length `magnitude` perpendicular to `start -> end`, rotated counter-clockwise
/// for a positive magnitude. Zero when the points coincide.
pub fn perpendicular_offset(start: Point, end: Point, magnitude: f64) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let dist = dx.hypot(dy);
    if dist == 0.0 {
        return Point::default();
    }
    Point::new(-dy / dist * magnitude, dx / dist * magnitude)
}

/// Control points at 30% and 70% of the chord, both pushed sideways by
/// `chord length * curve_intensity` in the direction of `bend` (+1 or -1).
pub fn bezier_controls(start: Point, end: Point, curve_intensity: f64, bend: f64) -> (Point, Point) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let offset = perpendicular_offset(start, end, start.distance(end) * curve_intensity * bend);
    let near = Point::new(start.x + dx * CONTROL_NEAR + offset.x, start.y + dy * CONTROL_NEAR + offset.y);
    let far = Point::new(start.x + dx * CONTROL_FAR + offset.x, start.y + dy * CONTROL_FAR + offset.y);
    (near, far)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicBezier {
    pub fn path_data(&self) -> String {
        let mut d = String::with_capacity(64);
        let _ = write!(
            d,
            "M{},{} C{},{} {},{} {},{}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        );
        d
    }
}

/// Curved connector between two cards of side `card_size`, centred at `from` and `to`.
///
/// The bend flips with the horizontal direction of travel, so a connector bows to the same
/// side on screen whichever end it starts from.
pub fn curved_connector(
    from: Point,
    to: Point,
    card_size: f64,
    curve_intensity: f64,
) -> Option<CubicBezier> {
    let (start, end) = anchor_points(from, to, Size::square(card_size / 2.0))?;
    let bend = if to.x - from.x <= 0.0 { 1.0 } else { -1.0 };
    let (control1, control2) = bezier_controls(start, end, curve_intensity, bend);
    Some(CubicBezier { start, control1, control2, end })
}

/// Large-arc loop for a passage that links to itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopArc {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
}

impl LoopArc {
    pub fn path_data(&self) -> String {
        let mut d = String::with_capacity(48);
        let _ = write!(
            d,
            "M{},{} A{},{} 0 1 1 {},{}",
            self.start.x, self.start.y, self.radius, self.radius, self.end.x, self.end.y
        );
        d
    }
}

/// Loop starting at the card center and ending `lift` units above it.
pub fn self_loop_arc(center: Point, radius: f64, lift: f64) -> LoopArc {
    LoopArc { start: center, end: center.offset(0.0, -lift), radius }
}
