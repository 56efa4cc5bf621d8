// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types: editor records consumed by the pipeline and the derived
//! structures it produces.
//!
//! Editor positions (`Point2D`, corner/door/window/furniture `x`/`y`) are in
//! editor units (pixels, y down). Every size (thickness, height, width, depth,
//! sill height) is in feet.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::coords::CoordinateConfig;
use crate::error::{Error, Result};

/// A 2D point in editor space (y increases downward)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A 3D point in scene space (feet, y up)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Distance in the horizontal (XZ) plane
    pub fn distance_xz(&self, other: &Point3D) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }
}

/// A wall-graph vertex
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Corner {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl Corner {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Wall classification
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    #[default]
    Solid,
    /// Rendered at a fraction of the standard height, never hosts openings
    Partition,
    /// Subdivides space for room detection, never rendered
    Virtual,
}

/// A wall-graph edge between two corners
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: String,
    pub start_corner_id: String,
    pub end_corner_id: String,
    /// Feet; the configured default applies when absent
    #[serde(default)]
    pub thickness: Option<f64>,
    /// Feet; the configured ceiling height applies when absent
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub wall_type: WallType,
}

impl Wall {
    pub fn new(
        id: impl Into<String>,
        start_corner_id: impl Into<String>,
        end_corner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_corner_id: start_corner_id.into(),
            end_corner_id: end_corner_id.into(),
            thickness: None,
            height: None,
            wall_type: WallType::Solid,
        }
    }

    pub fn with_type(mut self, wall_type: WallType) -> Self {
        self.wall_type = wall_type;
        self
    }
}

pub const DEFAULT_ROOM_TYPE: &str = "room";

fn default_room_type() -> String {
    DEFAULT_ROOM_TYPE.to_string()
}

/// A room: drawn directly (polygon input) or derived from the wall graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "default_room_type")]
    pub room_type: String,
    /// Boundary ring in editor space, not closed (last != first)
    #[serde(default)]
    pub vertices: Vec<Point2D>,
    /// Corner ids of the boundary ring (graph-derived rooms only)
    #[serde(default)]
    pub corner_ids: Vec<String>,
    /// Square feet
    #[serde(default)]
    pub area: f64,
}

impl Room {
    pub fn from_vertices(id: impl Into<String>, vertices: Vec<Point2D>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            room_type: default_room_type(),
            vertices,
            corner_ids: Vec::new(),
            area: 0.0,
        }
    }

    /// Calculate polygon area using shoelace formula (units of the input)
    pub fn calculate_area(points: &[Point2D]) -> f64 {
        signed_area(points).abs()
    }
}

/// Signed shoelace area of an editor-space ring
pub fn signed_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    area / 2.0
}

/// A door placed in the editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: String,
    #[serde(rename = "type", default)]
    pub door_type: String,
    pub x: f64,
    pub y: f64,
    /// Editor degrees, 0 = pointing right, clockwise positive
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    /// Host wall hint from the editor
    #[serde(default)]
    pub wall_id: Option<String>,
}

/// A window placed in the editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: String,
    #[serde(rename = "type", default)]
    pub window_type: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub sill_height: Option<f64>,
    #[serde(default)]
    pub wall_id: Option<String>,
}

/// A furniture item placed in the editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Furniture {
    pub id: String,
    #[serde(rename = "type", default)]
    pub furniture_type: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    pub width: f64,
    pub depth: f64,
}

impl Furniture {
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Per-room finish selection feeding the wall/floor palette
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomFinish {
    pub room_id: String,
    pub vibe: String,
    pub tier: String,
}

/// Seed for the first-person camera
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CameraPlacement {
    /// Editor space
    pub position: Point2D,
    /// Editor degrees
    #[serde(default)]
    pub rotation: f64,
    /// Vertical field of view in degrees
    #[serde(default)]
    pub fov: Option<f64>,
    /// Eye height in feet
    #[serde(default)]
    pub height: Option<f64>,
}

/// Immutable editor snapshot consumed by one recompute.
///
/// When `walls` is non-empty the plan is treated as a corner/wall graph;
/// otherwise wall edges are derived from the room polygons.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FloorPlan {
    pub coordinates: CoordinateConfig,
    pub corners: Vec<Corner>,
    pub walls: Vec<Wall>,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub furniture: Vec<Furniture>,
    pub finishes: Vec<RoomFinish>,
    pub camera: Option<CameraPlacement>,
}

impl FloorPlan {
    pub fn is_wall_graph(&self) -> bool {
        !self.walls.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn finish_for(&self, room_id: &str) -> Option<&RoomFinish> {
        self.finishes.iter().find(|f| f.room_id == room_id)
    }
}

/// Door or window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// An opening attached to a wall edge, in 1-D wall coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallOpening {
    pub kind: OpeningKind,
    /// Center distance from the edge start, clamped to `[0, length]`
    pub position: f64,
    pub width: f64,
    pub height: f64,
    /// Height of the opening bottom above the floor (0 for doors)
    pub bottom_offset: f64,
    pub item_id: String,
}

impl WallOpening {
    pub fn start(&self) -> f64 {
        self.position - self.width / 2.0
    }

    pub fn end(&self) -> f64 {
        self.position + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.bottom_offset + self.height
    }
}

/// A deduplicated physical wall segment in scene space
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallEdge {
    /// Canonical key of the two endpoints, smaller point first
    pub id: String,
    pub start: Point3D,
    pub end: Point3D,
    /// One id for an exterior wall, two for a shared interior wall
    pub room_ids: SmallVec<[String; 2]>,
    /// Sorted by `position`
    pub openings: Vec<WallOpening>,
    pub length: f64,
    /// Heading in the XZ plane, `atan2(dz, dx)`
    pub angle: f64,
    pub thickness: f64,
    pub height: f64,
    pub wall_type: WallType,
    /// Editor wall id (graph input only)
    #[serde(default)]
    pub source_wall_id: Option<String>,
}

/// Padded scene rectangle used to frame cameras
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
    pub width: f64,
    pub depth: f64,
    pub center_x: f64,
    pub center_z: f64,
}

impl SceneBounds {
    /// Tightest XZ box around `points`, padded by `margin` on every side.
    /// An empty set yields a `2 * margin` square around the origin.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3D>, margin: f64) -> Self {
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_z = f64::MAX;
        let mut max_z = f64::MIN;

        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_z = min_z.min(p.z);
            max_z = max_z.max(p.z);
        }

        if min_x > max_x {
            min_x = 0.0;
            max_x = 0.0;
            min_z = 0.0;
            max_z = 0.0;
        }

        Self::from_extents(min_x - margin, max_x + margin, min_z - margin, max_z + margin)
    }

    fn from_extents(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
            width: max_x - min_x,
            depth: max_z - min_z,
            center_x: (min_x + max_x) / 2.0,
            center_z: (min_z + max_z) / 2.0,
        }
    }

    pub fn max_extent(&self) -> f64 {
        self.width.max(self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_room_area() {
        let boundary = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];

        assert!((Room::calculate_area(&boundary) - 100.0).abs() < 1e-9);
        assert_eq!(Room::calculate_area(&boundary[..2]), 0.0);
    }

    #[test]
    fn test_scene_bounds_padding() {
        let points = [Point3D::new(-10.0, 0.0, -5.0), Point3D::new(10.0, 3.0, 5.0)];
        let bounds = SceneBounds::from_points(&points, 5.0);

        assert_eq!(bounds.min_x, -15.0);
        assert_eq!(bounds.max_z, 10.0);
        assert_eq!(bounds.width, 30.0);
        assert_eq!(bounds.depth, 20.0);
        assert_eq!(bounds.center_x, 0.0);
        assert_eq!(bounds.max_extent(), 30.0);
    }

    #[test]
    fn test_scene_bounds_empty() {
        let none: [Point3D; 0] = [];
        let bounds = SceneBounds::from_points(&none, 5.0);
        assert_eq!(bounds.width, 10.0);
        assert_eq!(bounds.depth, 10.0);
        assert_eq!(bounds.center_z, 0.0);
    }

    #[test]
    fn test_floor_plan_json_defaults() {
        let json = r#"{
            "corners": [{"id": "a", "x": 0, "y": 0}, {"id": "b", "x": 100, "y": 0}],
            "walls": [{"id": "w1", "startCornerId": "a", "endCornerId": "b", "wallType": "partition"}],
            "furniture": [{"id": "f1", "type": "bed", "x": 10, "y": 10, "width": 5, "depth": 7}]
        }"#;

        let plan = FloorPlan::from_json_str(json).unwrap();
        assert!(plan.is_wall_graph());
        assert_eq!(plan.walls[0].wall_type, WallType::Partition);
        assert_eq!(plan.walls[0].thickness, None);
        assert_eq!(plan.furniture[0].furniture_type, "bed");
        assert_eq!(plan.coordinates, CoordinateConfig::default());
    }

    #[test]
    fn test_floor_plan_invalid_json() {
        assert!(FloorPlan::from_json_str("{\"walls\": 3}").is_err());
    }
}
