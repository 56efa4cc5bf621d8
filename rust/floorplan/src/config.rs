// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration.
//!
//! Every threshold the pipeline uses lives here. Values load from an
//! optional JSON file; a handful of frequently tuned ones can then be
//! overridden from the environment.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Wall dimensions and edge-key precision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WallConfig {
    /// Thickness in feet for walls that don't specify one
    pub default_thickness: f64,
    /// Standard wall height in feet
    pub ceiling_height: f64,
    /// Partition height as a fraction of `ceiling_height`
    pub partition_height_ratio: f64,
    /// Walls shorter than this (feet) are skipped
    pub min_wall_length: f64,
    /// Edge keys round coordinates to `1 / key_precision` feet
    pub key_precision: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            default_thickness: 0.5,
            ceiling_height: 9.0,
            partition_height_ratio: 0.5,
            min_wall_length: 0.1,
            key_precision: 100.0,
        }
    }
}

impl WallConfig {
    pub fn partition_height(&self) -> f64 {
        self.ceiling_height * self.partition_height_ratio
    }
}

/// Opening attachment thresholds and fixture defaults (feet)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningConfig {
    /// Maximum distance from an item to its host wall
    pub attach_distance: f64,
    /// Maximum deviation from parallel, in degrees, either direction
    pub rotation_tolerance_deg: f64,
    /// Wall pieces thinner or shorter than this are dropped
    pub segment_epsilon: f64,
    pub door_width: f64,
    pub door_height: f64,
    pub window_width: f64,
    pub window_height: f64,
    pub window_sill_height: f64,
}

impl Default for OpeningConfig {
    fn default() -> Self {
        Self {
            attach_distance: 2.0,
            rotation_tolerance_deg: 45.0,
            segment_epsilon: 0.1,
            door_width: 3.0,
            door_height: 7.0,
            window_width: 3.0,
            window_height: 4.0,
            window_sill_height: 3.0,
        }
    }
}

/// Room detection and reconciliation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectionConfig {
    /// Faces smaller than this (square feet) are not rooms
    pub min_room_area: f64,
    pub min_corners: usize,
    pub min_walls: usize,
    /// Quiet period before detection runs after an edit
    pub debounce_ms: u64,
    /// Fraction of shared vertices needed to carry metadata over
    pub min_vertex_overlap: f64,
    /// Fallback centroid match radius in feet
    pub centroid_match_distance: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_room_area: 1.0,
            min_corners: 3,
            min_walls: 3,
            debounce_ms: 300,
            min_vertex_overlap: 0.5,
            centroid_match_distance: 2.0,
        }
    }
}

/// Scene assembly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    /// Padding around the tightest scene box, feet
    pub bounds_margin: f64,
    /// Floor polygons sit this far above the ground plane
    pub floor_offset: f64,
    /// Ground plane size as a multiple of the largest bounds extent
    pub ground_scale: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bounds_margin: 5.0,
            floor_offset: 0.01,
            ground_scale: 3.0,
        }
    }
}

/// Camera controllers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    /// First-person eye height, feet
    pub eye_height: f64,
    /// Feet per second
    pub move_speed: f64,
    /// Radians per pixel of mouse movement
    pub look_sensitivity: f64,
    /// Velocity decay rate after keys are released, 1/s
    pub damping: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Vertical field of view, degrees
    pub fov: f64,
    /// Extra space around the bounds when framing top-down, feet
    pub framing_margin: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye_height: 5.5,
            move_speed: 10.0,
            look_sensitivity: 0.002,
            damping: 8.0,
            min_zoom: 0.25,
            max_zoom: 4.0,
            fov: 60.0,
            framing_margin: 2.0,
        }
    }
}

/// All pipeline settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub walls: WallConfig,
    pub openings: OpeningConfig,
    pub detection: DetectionConfig,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
}

impl PipelineConfig {
    /// Load from an optional JSON file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str(&text)?
            }
            None => Self::default(),
        };

        Ok(config.with_env_overrides())
    }

    /// Override selected settings from `PLANVIEW_*` environment variables.
    /// Unparseable values keep the current setting.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse_or<T: std::str::FromStr + Copy>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            current: T,
        ) -> T {
            match lookup(key) {
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    debug!(key, raw = raw.as_str(), "ignoring unparseable override");
                    current
                }),
                None => current,
            }
        }

        self.walls.ceiling_height =
            parse_or(&lookup, "PLANVIEW_CEILING_HEIGHT", self.walls.ceiling_height);
        self.walls.default_thickness =
            parse_or(&lookup, "PLANVIEW_WALL_THICKNESS", self.walls.default_thickness);
        self.openings.attach_distance =
            parse_or(&lookup, "PLANVIEW_ATTACH_DISTANCE", self.openings.attach_distance);
        self.openings.rotation_tolerance_deg = parse_or(
            &lookup,
            "PLANVIEW_ROTATION_TOLERANCE",
            self.openings.rotation_tolerance_deg,
        );
        self.detection.debounce_ms =
            parse_or(&lookup, "PLANVIEW_DEBOUNCE_MS", self.detection.debounce_ms);
        self
    }
}
