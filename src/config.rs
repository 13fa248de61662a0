// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::render::geometry::snap_to_grid;

pub const DEFAULT_CARD_SIZE: f64 = 97.0;
pub const DEFAULT_GRID_SIZE: f64 = 25.0;
pub const DEFAULT_CURVE_INTENSITY: f64 = 0.15;
pub const DEFAULT_MIN_CARD_SIZE: f64 = 8.0;
pub const DEFAULT_ZOOM_SPEED: f64 = 0.01;
pub const DEFAULT_SELF_LOOP_RADIUS: f64 = 40.0;
pub const DEFAULT_SELF_LOOP_LIFT: f64 = 50.0;

/// Sizes and tuning for one graph. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub card_size: f64,
    pub grid_size: f64,
    pub curve_intensity: f64,
    pub min_card_size: f64,
    /// Defaults to `card_size`, which caps zoom at 1.
    pub max_card_size: Option<f64>,
    pub zoom_speed: f64,
    pub self_loop_radius: f64,
    pub self_loop_lift: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            card_size: DEFAULT_CARD_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
            curve_intensity: DEFAULT_CURVE_INTENSITY,
            min_card_size: DEFAULT_MIN_CARD_SIZE,
            max_card_size: None,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            self_loop_radius: DEFAULT_SELF_LOOP_RADIUS,
            self_loop_lift: DEFAULT_SELF_LOOP_LIFT,
        }
    }
}

impl GraphConfig {
    pub fn max_card_size(&self) -> f64 {
        self.max_card_size.unwrap_or(self.card_size)
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_card_size / self.card_size
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_card_size() / self.card_size
    }

    /// Grid-snapped distance between a card and the next one placed beside it.
    pub fn placement_step(&self) -> f64 {
        snap_to_grid(self.card_size + self.grid_size, self.grid_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("card_size", self.card_size),
            ("grid_size", self.grid_size),
            ("min_card_size", self.min_card_size),
            ("max_card_size", self.max_card_size()),
            ("zoom_speed", self.zoom_speed),
            ("self_loop_radius", self.self_loop_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("curve_intensity", self.curve_intensity),
            ("self_loop_lift", self.self_loop_lift),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let (min_zoom, max_zoom) = (self.min_zoom(), self.max_zoom());
        if min_zoom > max_zoom {
            return Err(ConfigError::ZoomRange { min_zoom, max_zoom });
        }
        Ok(())
    }

    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(src).map_err(|source| ConfigError::Json {
            path: None,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src).map_err(|err| err.with_path(path))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f64 },
    NotFinite { field: &'static str, value: f64 },
    ZoomRange { min_zoom: f64, max_zoom: f64 },
    Io { path: PathBuf, source: io::Error },
    Json { path: Option<PathBuf>, source: serde_json::Error },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Json { path: None, source } => Self::Json {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "config field {field} must be positive (got {value})")
            }
            Self::NotFinite { field, value } => {
                write!(f, "config field {field} must be finite (got {value})")
            }
            Self::ZoomRange { min_zoom, max_zoom } => write!(
                f,
                "min zoom {min_zoom} exceeds max zoom {max_zoom}; raise max_card_size or lower min_card_size"
            ),
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path: Some(path), source } => write!(f, "json error at {path:?}: {source}"),
            Self::Json { path: None, source } => write!(f, "json error: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_zoom_range_up_to_one() {
        let config = GraphConfig::default();
        assert_eq!(config.max_card_size(), 97.0);
        assert_eq!(config.max_zoom(), 1.0);
        assert!((config.min_zoom() - 8.0 / 97.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn placement_step_is_grid_snapped() {
        // 97 + 25 = 122, nearest multiple of 25 is 125.
        assert_eq!(GraphConfig::default().placement_step(), 125.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GraphConfig::from_json_str(r#"{"grid_size": 10, "max_card_size": 194}"#).unwrap();
        assert_eq!(config.grid_size, 10.0);
        assert_eq!(config.card_size, DEFAULT_CARD_SIZE);
        assert_eq!(config.max_zoom(), 2.0);
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let err = GraphConfig::from_json_str(r#"{"card_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "card_size", .. }));
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let err = GraphConfig::from_json_str(r#"{"min_card_size": 120}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZoomRange { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GraphConfig::load(Path::new("/definitely/not/here/quilt.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("quilt.json"));
    }
}
