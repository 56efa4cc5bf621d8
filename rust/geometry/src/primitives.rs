// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene primitives in the Y-up frame: boxes, cylinders and floor polygons.
//!
//! Boxes and cylinders are profile extrusions stood upright by
//! [`plane_transform`]; floors are triangulated directly in the XZ plane.

use crate::error::{Error, Result};
use crate::extrusion::extrude_profile;
use crate::mesh::Mesh;
use crate::profile::{create_circle, create_rectangle};
use crate::triangulation::triangulate_polygon;
use nalgebra::{Matrix4, Point2, Point3, Rotation3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Transform taking a profile extruded along +Z into the scene: profile X
/// stays X, the extrusion axis becomes +Y, then the result is rotated by
/// `rotation_y` around the up axis and moved so the base center sits on
/// `base_center`.
pub fn plane_transform(base_center: Point3<f64>, rotation_y: f64) -> Matrix4<f64> {
    // (x, y, z) -> (x, z, -y)
    let stand_up = Rotation3::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
    let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation_y);

    Matrix4::new_translation(&base_center.coords)
        * yaw.to_homogeneous()
        * stand_up.to_homogeneous()
}

/// Box with `size = (length along local X, height, depth along local Z)`
/// standing on `base_center`.
pub fn box_mesh(size: Vector3<f64>, base_center: Point3<f64>, rotation_y: f64) -> Result<Mesh> {
    if size.x <= 0.0 || size.z <= 0.0 {
        return Err(Error::DegeneratePrimitive(format!(
            "box footprint {:.3} x {:.3}",
            size.x, size.z
        )));
    }
    let profile = create_rectangle(size.x, size.z);
    extrude_profile(
        &profile,
        size.y,
        Some(plane_transform(base_center, rotation_y)),
    )
}

/// Upright cylinder standing on `base_center`
pub fn cylinder_mesh(radius: f64, height: f64, base_center: Point3<f64>) -> Result<Mesh> {
    if radius <= 0.0 {
        return Err(Error::DegeneratePrimitive(format!("cylinder radius {radius:.3}")));
    }
    let profile = create_circle(radius);
    extrude_profile(&profile, height, Some(plane_transform(base_center, 0.0)))
}

/// Flat upward-facing polygon from scene points (their Y is kept).
pub fn floor_mesh(vertices: &[Point3<f64>]) -> Result<Mesh> {
    let flat: Vec<Point2<f64>> = vertices.iter().map(|p| Point2::new(p.x, p.z)).collect();
    let indices = triangulate_polygon(&flat)?;

    let up = Vector3::y();
    let mut mesh = Mesh::with_capacity(vertices.len(), indices.len());
    for p in vertices {
        mesh.add_vertex(*p, up);
    }

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (flat[tri[0]], flat[tri[1]], flat[tri[2]]);
        let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        // Negative XZ cross product faces +Y
        if cross < 0.0 {
            mesh.add_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
        } else {
            mesh.add_triangle(tri[0] as u32, tri[2] as u32, tri[1] as u32);
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_plane_transform_stands_extrusion_up() {
        let m = plane_transform(Point3::origin(), 0.0);
        let p = m.transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_box_mesh_bounds() {
        let mesh = box_mesh(
            Vector3::new(10.0, 9.0, 0.5),
            Point3::new(5.0, 0.0, -2.0),
            0.0,
        )
        .unwrap();

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max.x, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(min.y, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max.y, 9.0, epsilon = 1e-4);
        assert_abs_diff_eq!(min.z, -2.25, epsilon = 1e-4);
        assert_abs_diff_eq!(max.z, -1.75, epsilon = 1e-4);
    }

    #[test]
    fn test_box_mesh_rotated_quarter_turn() {
        // Local X maps onto -Z after +90 degrees about Y
        let mesh = box_mesh(
            Vector3::new(4.0, 1.0, 1.0),
            Point3::origin(),
            FRAC_PI_2,
        )
        .unwrap();

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(max.x - min.x, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max.z - min.z, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_box_rejected() {
        assert!(box_mesh(Vector3::new(0.0, 1.0, 1.0), Point3::origin(), 0.0).is_err());
        assert!(box_mesh(Vector3::new(1.0, 0.0, 1.0), Point3::origin(), 0.0).is_err());
    }

    #[test]
    fn test_cylinder_mesh() {
        let mesh = cylinder_mesh(0.5, 3.0, Point3::new(1.0, 0.0, 1.0)).unwrap();
        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.y, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max.y, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max.x, 1.5, epsilon = 0.01);
    }

    #[test]
    fn test_floor_mesh_faces_up() {
        let vertices = vec![
            Point3::new(0.0, 0.01, 0.0),
            Point3::new(20.0, 0.01, 0.0),
            Point3::new(20.0, 0.01, -15.0),
            Point3::new(0.0, 0.01, -15.0),
        ];
        let mesh = floor_mesh(&vertices).unwrap();
        assert_eq!(mesh.triangle_count(), 2);

        for tri in mesh.indices.chunks_exact(3) {
            let p = |i: u32| {
                let i = i as usize * 3;
                Vector3::new(
                    mesh.positions[i] as f64,
                    mesh.positions[i + 1] as f64,
                    mesh.positions[i + 2] as f64,
                )
            };
            let n = (p(tri[1]) - p(tri[0])).cross(&(p(tri[2]) - p(tri[0])));
            assert!(n.y > 0.0);
        }
    }
}
