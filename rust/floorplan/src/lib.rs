// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan to 3D scene derivation
//!
//! This crate turns the flat records of a 2D floor plan editor into a
//! renderable scene:
//! 1. Converting editor pixels to a centered, Y-up scene in feet
//! 2. Detecting rooms as bounded faces of the corner/wall graph, keeping
//!    room identity and metadata across edits
//! 3. Building deduplicated wall edges and attaching doors and windows
//! 4. Cutting walls into solid pieces around their openings
//! 5. Assembling floors, walls, fixtures, furniture and ground into a scene
//! 6. Driving top-down and first-person cameras over the result
//!
//! # Usage
//!
//! ```rust,ignore
//! use planview_floorplan::{plan_to_scene, FloorPlan, PipelineConfig};
//!
//! let mut plan = FloorPlan::from_json_str(&json)?;
//! let config = PipelineConfig::load(None)?;
//!
//! // Refresh rooms from the wall graph, then derive the scene
//! let scene = plan_to_scene(&mut plan, &config, true);
//! let meshes = scene.to_meshes();
//! ```

pub mod camera;
pub mod catalog;
pub mod config;
pub mod coords;
pub mod error;
pub mod mesh_export;
pub mod reconcile;
pub mod room_detector;
pub mod scene;
pub mod scheduler;
pub mod segmenter;
pub mod types;
pub mod wall_edges;

// Re-export commonly used types and functions
pub use camera::{CameraController, CameraMode, FirstPersonCamera, InputState, TopDownCamera};
pub use config::PipelineConfig;
pub use coords::{CoordinateConfig, CoordinateConverter};
pub use error::{Error, Result};
pub use mesh_export::{write_obj, SceneMeshes};
pub use reconcile::reconcile_rooms;
pub use room_detector::detect_rooms;
pub use scene::{assemble_scene, SceneDescription, SceneStats};
pub use scheduler::RoomDetectionScheduler;
pub use segmenter::{segment_wall, SegmentKind, WallSegment};
pub use types::{
    CameraPlacement, Corner, Door, FloorPlan, Furniture, OpeningKind, Point2D, Point3D, Room,
    RoomFinish, SceneBounds, Wall, WallEdge, WallOpening, WallType, Window,
};
pub use wall_edges::{assign_openings, build_graph_edges, build_polygon_edges};

use tracing::debug;

/// Re-detect the rooms of a wall-graph plan in place, keeping the ids,
/// names and types of rooms that survive. Polygon plans are left alone.
///
/// Returns the number of rooms after detection.
pub fn detect_plan_rooms(plan: &mut FloorPlan, config: &PipelineConfig) -> usize {
    if !plan.is_wall_graph() {
        debug!("plan has no wall graph, keeping drawn rooms");
        return plan.rooms.len();
    }

    let converter = CoordinateConverter::new(&plan.coordinates);
    let detected = detect_rooms(&plan.corners, &plan.walls, &converter, &config.detection);
    plan.rooms = reconcile_rooms(&plan.rooms, detected, &converter, &config.detection);
    plan.rooms.len()
}

/// Full pipeline: optional room detection followed by scene assembly
pub fn plan_to_scene(
    plan: &mut FloorPlan,
    config: &PipelineConfig,
    detect: bool,
) -> SceneDescription {
    if detect {
        detect_plan_rooms(plan, config);
    }
    assemble_scene(plan, config)
}
