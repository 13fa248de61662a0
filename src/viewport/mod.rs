// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pan and zoom state of the graph surface.
//!
//! Screen points are relative to the page; the container sits at `origin` on the page and
//! the content layer is drawn at `translate` inside the container, scaled by `scale`.
//!
//! The content layer is `container / min_zoom` model units wide, so at minimum zoom it exactly
//! fills the container. Pan is clamped so the layer never leaves a gap at any container edge.

use crate::config::GraphConfig;
use crate::render::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    translate: Point,
    origin: Point,
    size: Size,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    /// Starts fully zoomed out with no pan.
    pub fn new(config: &GraphConfig, size: Size) -> Self {
        let min_zoom = config.min_zoom();
        Self {
            scale: min_zoom,
            translate: Point::default(),
            origin: Point::default(),
            size,
            min_zoom,
            max_zoom: config.max_zoom().max(min_zoom),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    pub fn container_origin(&self) -> Point {
        self.origin
    }

    pub fn container_size(&self) -> Size {
        self.size
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn is_at_min_zoom(&self) -> bool {
        self.scale <= self.min_zoom
    }

    /// Moves and resizes the container, then re-clamps pan.
    pub fn set_container(&mut self, origin: Point, size: Size) {
        self.origin = origin;
        self.size = size;
        self.clamp_pan();
    }

    pub fn resize(&mut self, size: Size) {
        self.set_container(self.origin, size);
    }

    /// `z` limited to the zoom range. NaN keeps the current scale.
    pub fn clamp_zoom(&self, z: f64) -> f64 {
        if z.is_nan() {
            return self.scale;
        }
        z.clamp(self.min_zoom, self.max_zoom)
    }

    /// Applies a clamped scale without moving the pan anchor, then re-clamps pan.
    pub fn set_zoom(&mut self, z: f64) -> f64 {
        self.scale = self.clamp_zoom(z);
        self.clamp_pan();
        self.scale
    }

    /// Zooms keeping the model point under `anchor` (container coordinates) in place.
    pub fn zoom_at(&mut self, anchor: Point, z: f64) -> f64 {
        let next = self.clamp_zoom(z);
        let ratio = next / self.scale;
        self.translate = Point::new(
            anchor.x - (anchor.x - self.translate.x) * ratio,
            anchor.y - (anchor.y - self.translate.y) * ratio,
        );
        self.scale = next;
        self.clamp_pan();
        self.scale
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_to(self.translate.x + dx, self.translate.y + dy);
    }

    pub fn pan_to(&mut self, x: f64, y: f64) {
        self.translate = Point::new(x, y);
        self.clamp_pan();
    }

    /// Pulls `translate` back into `[container - effective, 0]` on each axis.
    pub fn clamp_pan(&mut self) {
        // container - (container / min_zoom) * scale, exactly 0 at min zoom.
        let overflow = 1.0 - self.scale / self.min_zoom;
        let min_x = self.size.width * overflow;
        let min_y = self.size.height * overflow;
        self.translate = Point::new(
            clamp_axis(self.translate.x, min_x),
            clamp_axis(self.translate.y, min_y),
        );
    }

    /// Zooms to `target_scale` (or keeps the current scale) and pans so `model_point` lands in
    /// the middle of the container.
    pub fn center_on(&mut self, model_point: Point, target_scale: Option<f64>) -> f64 {
        let z = self.clamp_zoom(target_scale.unwrap_or(self.scale));
        self.scale = z;
        self.translate = Point::new(
            self.size.width / 2.0 - model_point.x * z,
            self.size.height / 2.0 - model_point.y * z,
        );
        self.clamp_pan();
        z
    }

    pub fn screen_to_model(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x - self.translate.x) / self.scale,
            (screen.y - self.origin.y - self.translate.y) / self.scale,
        )
    }

    pub fn model_to_screen(&self, model: Point) -> Point {
        Point::new(
            model.x * self.scale + self.translate.x + self.origin.x,
            model.y * self.scale + self.translate.y + self.origin.y,
        )
    }

    /// Logical size of the content layer in model units.
    pub fn content_extent(&self) -> Size {
        Size::new(self.size.width / self.min_zoom, self.size.height / self.min_zoom)
    }

    /// Part of model space currently visible in the container.
    pub fn visible_model_rect(&self) -> Rect {
        Rect::new(
            -self.translate.x / self.scale,
            -self.translate.y / self.scale,
            self.size.width / self.scale,
            self.size.height / self.scale,
        )
    }
}

fn clamp_axis(value: f64, min: f64) -> f64 {
    // `min` is never positive while scale >= min_zoom; a collapsed range pins to 0.
    value.max(min).min(0.0)
}
