// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle meshes for a [`SceneDescription`], grouped per element, plus a
//! Wavefront OBJ writer for offline viewing.

use std::io::{self, Write};

use nalgebra::{Point3, Vector3};
use planview_geometry::{box_mesh, cylinder_mesh, floor_mesh, Mesh, MeshCollection};
use tracing::warn;

use crate::error::Result;
use crate::scene::{Primitive, SceneDescription};
use crate::types::Point3D;

/// Scene meshes split by layer. Element ids are the source item ids; wall
/// pieces are numbered `{edge_id}#{n}`.
#[derive(Debug, Clone, Default)]
pub struct SceneMeshes {
    pub floors: MeshCollection,
    pub walls: MeshCollection,
    pub fixtures: MeshCollection,
    pub furniture: MeshCollection,
    pub ground: MeshCollection,
}

impl SceneMeshes {
    pub fn layers(&self) -> [(&'static str, &MeshCollection); 5] {
        [
            ("floors", &self.floors),
            ("walls", &self.walls),
            ("fixtures", &self.fixtures),
            ("furniture", &self.furniture),
            ("ground", &self.ground),
        ]
    }

    pub fn triangle_count(&self) -> usize {
        self.layers().iter().map(|(_, c)| c.triangle_count()).sum()
    }
}

/// Mesh for one primitive already in scene space
pub fn primitive_mesh(primitive: &Primitive) -> Result<Mesh> {
    let mesh = match *primitive {
        Primitive::Box {
            center,
            size,
            rotation_y,
            ..
        } => {
            let base = center.with_y(center.y - size.height / 2.0);
            box_mesh(
                Vector3::new(size.width, size.height, size.depth),
                base.to_nalgebra(),
                rotation_y,
            )?
        }
        Primitive::Cylinder {
            center,
            radius,
            height,
            ..
        } => cylinder_mesh(radius, height, center.with_y(center.y - height / 2.0).to_nalgebra())?,
    };
    Ok(mesh)
}

/// Merge parts placed at `origin` turned by `rotation_y`; failed parts are
/// logged and left out.
fn assembly_mesh(id: &str, parts: &[Primitive], origin: Point3D, rotation_y: f64) -> Mesh {
    let mut mesh = Mesh::new();
    for part in parts {
        match primitive_mesh(&part.transformed(origin, rotation_y)) {
            Ok(m) => mesh.merge(&m),
            Err(e) => warn!(element = id, error = %e, "skipping part"),
        }
    }
    mesh
}

impl SceneDescription {
    /// Tessellate every element. Degenerate elements are skipped with a
    /// warning rather than failing the whole scene.
    pub fn to_meshes(&self) -> SceneMeshes {
        let mut out = SceneMeshes::default();

        for floor in &self.floors {
            let ring: Vec<Point3<f64>> = floor.vertices.iter().map(Point3D::to_nalgebra).collect();
            match floor_mesh(&ring) {
                Ok(mesh) => out.floors.add(floor.room_id.clone(), mesh),
                Err(e) => warn!(room = %floor.room_id, error = %e, "skipping floor"),
            }
        }

        let mut piece_index = 0usize;
        let mut last_edge: Option<&str> = None;
        for piece in &self.walls {
            if last_edge != Some(piece.edge_id.as_str()) {
                piece_index = 0;
                last_edge = Some(piece.edge_id.as_str());
            }
            match primitive_mesh(&piece.primitive) {
                Ok(mesh) => out.walls.add(format!("{}#{}", piece.edge_id, piece_index), mesh),
                Err(e) => warn!(edge = %piece.edge_id, error = %e, "skipping wall piece"),
            }
            piece_index += 1;
        }

        for (i, post) in self.corner_posts.iter().enumerate() {
            match primitive_mesh(post) {
                Ok(mesh) => out.walls.add(format!("post#{i}"), mesh),
                Err(e) => warn!(post = i, error = %e, "skipping corner post"),
            }
        }

        for fixture in &self.fixtures {
            let mesh = assembly_mesh(
                &fixture.item_id,
                &fixture.parts,
                fixture.position,
                fixture.rotation_y,
            );
            if !mesh.is_empty() {
                out.fixtures.add(fixture.item_id.clone(), mesh);
            }
        }

        for item in &self.furniture {
            let mesh = assembly_mesh(&item.item_id, &item.parts, item.position, item.rotation_y);
            if !mesh.is_empty() {
                out.furniture.add(item.item_id.clone(), mesh);
            }
        }

        let half = self.ground.size / 2.0;
        let c = self.ground.center;
        let ground = [
            Point3::new(c.x - half, 0.0, c.z - half),
            Point3::new(c.x + half, 0.0, c.z - half),
            Point3::new(c.x + half, 0.0, c.z + half),
            Point3::new(c.x - half, 0.0, c.z + half),
        ];
        match floor_mesh(&ground) {
            Ok(mesh) => out.ground.add("ground", mesh),
            Err(e) => warn!(error = %e, "skipping ground plane"),
        }

        out
    }
}

/// Write all layers as OBJ, one object per element. The scene is already
/// Y-up so no axis swap is applied.
pub fn write_obj<W: Write + ?Sized>(writer: &mut W, meshes: &SceneMeshes) -> io::Result<()> {
    writeln!(writer, "# Generated by plan-to-scene")?;
    writeln!(writer, "# Units: feet, Y-up")?;

    let mut vertex_offset: u32 = 0;

    for (layer, collection) in meshes.layers() {
        writeln!(writer, "g {layer}")?;
        for element in collection.iter() {
            let mesh = &element.mesh;
            writeln!(writer, "o {}", element.element_id.replace(char::is_whitespace, "_"))?;

            for v in mesh.positions.chunks_exact(3) {
                writeln!(writer, "v {:.6} {:.6} {:.6}", v[0], v[1], v[2])?;
            }
            for n in mesh.normals.chunks_exact(3) {
                writeln!(writer, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
            }
            for t in mesh.indices.chunks_exact(3) {
                let (a, b, c) = (
                    t[0] + vertex_offset + 1,
                    t[1] + vertex_offset + 1,
                    t[2] + vertex_offset + 1,
                );
                writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
            }

            vertex_offset += mesh.vertex_count() as u32;
        }
    }

    Ok(())
}
