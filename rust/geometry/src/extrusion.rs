// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to closed prisms

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude a 2D profile along the local Z axis from `0` to `depth`.
///
/// The optional transform is applied to positions and normals afterwards;
/// [`crate::primitives::plane_transform`] builds the one used to stand
/// extrusions upright in the Y-up scene.
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    if !(depth > 0.0) {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got {depth}"
        )));
    }

    let triangulation = profile.triangulate()?;

    let side_vertex_count = profile.outer.len() * 4;
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + side_vertex_count,
        triangulation.indices.len() * 2 + profile.outer.len() * 6,
    );

    create_cap_mesh(&triangulation, 0.0, Vector3::new(0.0, 0.0, -1.0), &mut mesh);
    create_cap_mesh(&triangulation, depth, Vector3::new(0.0, 0.0, 1.0), &mut mesh);
    create_side_walls(&profile.outer, depth, &mut mesh);

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Create a cap mesh (top or bottom) from triangulation
#[inline]
fn create_cap_mesh(triangulation: &Triangulation, z: f64, normal: Vector3<f64>, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;

        // Bottom cap faces -Z, so its winding is reversed
        if normal.z < 0.0 {
            mesh.add_triangle(i0, i2, i1);
        } else {
            mesh.add_triangle(i0, i1, i2);
        }
    }
}

/// Create side quads for a profile boundary
#[inline]
fn create_side_walls(boundary: &[Point2<f64>], depth: f64, mesh: &mut Mesh) {
    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue, // duplicate consecutive points
        };

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, depth), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, depth), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
}

/// Apply transformation matrix to mesh positions and normals
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Normals use the inverse transpose
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous()).xyz();
        let transformed = transformed.try_normalize(1e-12).unwrap_or(transformed);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{create_circle, create_rectangle};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_extrude_rectangle() {
        let profile = create_rectangle(10.0, 5.0);
        let mesh = extrude_profile(&profile, 20.0, None).unwrap();

        // 2 caps of 4 vertices + 4 side quads
        assert_eq!(mesh.vertex_count(), 8 + 16);
        assert_eq!(mesh.triangle_count(), 4 + 8);

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, -5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(max.x, 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(min.y, -2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(max.y, 2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(min.z, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(max.z, 20.0, epsilon = 1e-5);
    }

    #[test]
    fn test_extrude_with_transform() {
        let profile = create_rectangle(10.0, 5.0);
        let transform = Matrix4::new_translation(&Vector3::new(100.0, 200.0, 300.0));

        let mesh = extrude_profile(&profile, 20.0, Some(transform)).unwrap();

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, 95.0, epsilon = 1e-3);
        assert_abs_diff_eq!(max.x, 105.0, epsilon = 1e-3);
        assert_abs_diff_eq!(min.z, 300.0, epsilon = 1e-3);
        assert_abs_diff_eq!(max.z, 320.0, epsilon = 1e-3);
    }

    #[test]
    fn test_side_normals_point_outward() {
        let mesh = extrude_profile(&create_rectangle(2.0, 2.0), 1.0, None).unwrap();

        // Every side vertex normal points away from the prism axis
        for (pos, normal) in mesh
            .positions
            .chunks_exact(3)
            .zip(mesh.normals.chunks_exact(3))
            .filter(|(_, n)| n[2] == 0.0)
        {
            let radial = pos[0] * normal[0] + pos[1] * normal[1];
            assert!(radial > 0.0);
        }
    }

    #[test]
    fn test_extrude_circle() {
        let mesh = extrude_profile(&create_circle(1.0), 2.0, None).unwrap();
        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, -1.0, epsilon = 0.01);
        assert_abs_diff_eq!(max.x, 1.0, epsilon = 0.01);
        assert_abs_diff_eq!(max.z, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_depth() {
        let profile = create_rectangle(10.0, 5.0);
        assert!(extrude_profile(&profile, -1.0, None).is_err());
        assert!(extrude_profile(&profile, 0.0, None).is_err());
        assert!(extrude_profile(&profile, f64::NAN, None).is_err());
    }
}
