// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point3, Vector3};

/// Triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    /// Merge another mesh into this one, offsetting its indices
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = self.vertex_count() as u32;

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds (min, max); the origin for an empty mesh
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            for axis in 0..3 {
                min[axis] = min[axis].min(chunk[axis]);
                max[axis] = max[axis].max(chunk[axis]);
            }
        });

        (min, max)
    }
}

/// A mesh tagged with the id of the plan element it was built from
/// (room, wall edge, door, window or furniture item).
#[derive(Debug, Clone)]
pub struct ElementMesh {
    pub element_id: String,
    pub mesh: Mesh,
}

/// Ordered collection of element meshes for one scene category.
///
/// Keeps per-element identity so exporters can name objects and renderers
/// can pick individual items.
#[derive(Debug, Clone, Default)]
pub struct MeshCollection {
    pub elements: Vec<ElementMesh>,
}

impl MeshCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element mesh. Empty meshes are dropped; a repeated id merges
    /// into the existing entry.
    pub fn add(&mut self, element_id: impl Into<String>, mesh: Mesh) {
        if mesh.is_empty() {
            return;
        }
        let element_id = element_id.into();
        match self.elements.iter_mut().find(|e| e.element_id == element_id) {
            Some(existing) => existing.mesh.merge(&mesh),
            None => self.elements.push(ElementMesh { element_id, mesh }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementMesh> {
        self.elements.iter()
    }

    pub fn get(&self, element_id: &str) -> Option<&Mesh> {
        self.elements
            .iter()
            .find(|e| e.element_id == element_id)
            .map(|e| &e.mesh)
    }

    /// Total triangles across all elements
    pub fn triangle_count(&self) -> usize {
        self.elements.iter().map(|e| e.mesh.triangle_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::y());
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::y());
        mesh.add_vertex(Point3::new(0.0, 0.0, 1.0), Vector3::y());
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = triangle();
        let b = triangle();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(&a.indices[3..], &[3, 4, 5]);
    }

    #[test]
    fn test_bounds() {
        let mesh = triangle();
        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 0.0, 1.0));
        assert_eq!(Mesh::new().bounds().0, Point3::origin());
    }

    #[test]
    fn test_collection_merges_repeated_ids() {
        let mut collection = MeshCollection::new();
        collection.add("wall-a", triangle());
        collection.add("wall-a", triangle());
        collection.add("wall-b", triangle());
        collection.add("empty", Mesh::new());

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("wall-a").map(Mesh::triangle_count), Some(2));
        assert_eq!(collection.triangle_count(), 3);
    }
}
