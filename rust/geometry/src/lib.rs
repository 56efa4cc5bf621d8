// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planview Geometry
//!
//! Triangle mesh generation for floor plan scenes: rectangular and circular
//! profiles extruded into boxes and cylinders, and flat floor polygons
//! triangulated with earcutr. All math uses nalgebra in f64; meshes store f32
//! buffers ready for upload to a renderer.

pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod primitives;
pub mod profile;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use extrusion::{apply_transform, extrude_profile};
pub use mesh::{ElementMesh, Mesh, MeshCollection};
pub use primitives::{box_mesh, cylinder_mesh, floor_mesh, plane_transform};
pub use profile::{create_circle, create_rectangle, Profile2D};
pub use triangulation::triangulate_polygon;
