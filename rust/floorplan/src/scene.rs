// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene assembly: one editor snapshot in, one renderer-ready scene
//! description out.
//!
//! The description is plain data: floor polygons, wall boxes, corner posts,
//! door/window fixtures, furniture assemblies, a ground plane and the padded
//! scene bounds. Assembly never fails; degenerate input is skipped or falls
//! back to a catalog default.

use nalgebra::{Rotation3, Vector3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{
    furniture_spec, palette_for, DoorStyle, FurnitureKind, Material, Palette, WindowStyle,
    DEFAULT_WALL, GROUND,
};
use crate::config::PipelineConfig;
use crate::coords::{rotation_to_scene, CoordinateConverter};
use crate::segmenter::{segment_wall, SegmentKind};
use crate::types::{FloorPlan, OpeningKind, Point3D, Room, SceneBounds, WallEdge};
use crate::wall_edges::{
    assign_openings, build_graph_edges, build_polygon_edges, FreeOpening, OpeningAssignment,
};

/// Box extents: `width` along local X, `depth` along local Z
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// A renderable solid. `center` is the geometric center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Primitive {
    #[serde(rename_all = "camelCase")]
    Box {
        center: Point3D,
        size: Dimensions,
        /// Radians about +Y
        rotation_y: f64,
        material: Material,
    },
    Cylinder {
        center: Point3D,
        radius: f64,
        height: f64,
        material: Material,
    },
}

impl Primitive {
    pub fn center(&self) -> Point3D {
        match self {
            Primitive::Box { center, .. } | Primitive::Cylinder { center, .. } => *center,
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Box { material, .. } | Primitive::Cylinder { material, .. } => material,
        }
    }

    /// Move a local-space primitive into the scene: rotate by `rotation_y`
    /// about the local origin, then translate by `origin`.
    pub fn transformed(&self, origin: Point3D, rotation_y: f64) -> Primitive {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation_y);
        let place = |c: &Point3D| {
            let v = rotation * Vector3::new(c.x, c.y, c.z);
            Point3D::new(origin.x + v.x, origin.y + v.y, origin.z + v.z)
        };

        match *self {
            Primitive::Box {
                center,
                size,
                rotation_y: local,
                material,
            } => Primitive::Box {
                center: place(&center),
                size,
                rotation_y: local + rotation_y,
                material,
            },
            Primitive::Cylinder {
                center,
                radius,
                height,
                material,
            } => Primitive::Cylinder {
                center: place(&center),
                radius,
                height,
                material,
            },
        }
    }
}

/// Floor polygon of one room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorSurface {
    pub room_id: String,
    pub name: String,
    /// Scene ring at the floor offset height
    pub vertices: Vec<Point3D>,
    /// Square feet
    pub area: f64,
    pub material: Material,
}

/// One solid piece of a wall edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallPiece {
    pub edge_id: String,
    pub kind: SegmentKind,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum FixtureStyle {
    Door(DoorStyle),
    Window(WindowStyle),
}

/// A door or window assembly. `parts` are local to `position`, rotated by
/// `rotation_y`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub item_id: String,
    pub kind: OpeningKind,
    pub style: FixtureStyle,
    /// False when no wall was close enough and the item stands on its own
    pub attached: bool,
    pub edge_id: Option<String>,
    /// Bottom center of the opening
    pub position: Point3D,
    pub rotation_y: f64,
    pub width: f64,
    pub height: f64,
    pub parts: Vec<Primitive>,
}

/// Furniture assembly. `parts` are local to `position`, rotated by
/// `rotation_y`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureModel {
    pub item_id: String,
    pub kind: FurnitureKind,
    pub position: Point3D,
    pub rotation_y: f64,
    pub height: f64,
    pub parts: Vec<Primitive>,
}

/// Square ground plane centered under the scene
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GroundPlane {
    pub center: Point3D,
    pub size: f64,
    pub material: Material,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub floors: Vec<FloorSurface>,
    pub walls: Vec<WallPiece>,
    pub corner_posts: Vec<Primitive>,
    pub fixtures: Vec<Fixture>,
    pub furniture: Vec<FurnitureModel>,
    pub ground: GroundPlane,
    pub bounds: SceneBounds,
    /// The wall edges the pieces were cut from, openings included
    pub edges: Vec<WallEdge>,
}

/// Element counts for logging and the CLI summary
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SceneStats {
    pub floors: usize,
    pub wall_edges: usize,
    pub wall_segments: usize,
    pub corner_posts: usize,
    pub fixtures: usize,
    pub attached_openings: usize,
    pub unattached_openings: usize,
    pub furniture: usize,
}

impl SceneDescription {
    pub fn stats(&self) -> SceneStats {
        let attached = self.fixtures.iter().filter(|f| f.attached).count();
        SceneStats {
            floors: self.floors.len(),
            wall_edges: self.edges.len(),
            wall_segments: self.walls.len(),
            corner_posts: self.corner_posts.len(),
            fixtures: self.fixtures.len(),
            attached_openings: attached,
            unattached_openings: self.fixtures.len() - attached,
            furniture: self.furniture.len(),
        }
    }
}

/// Derive the full scene from an editor snapshot.
///
/// Graph plans (non-empty `walls`) use the listed rooms as they are; run
/// [`crate::detect_plan_rooms`] first to refresh them from the wall graph.
pub fn assemble_scene(plan: &FloorPlan, config: &PipelineConfig) -> SceneDescription {
    let converter = CoordinateConverter::new(&plan.coordinates);

    let mut edges = if plan.is_wall_graph() {
        build_graph_edges(&plan.corners, &plan.walls, &plan.rooms, &converter, &config.walls)
    } else {
        build_polygon_edges(&plan.rooms, &converter, &config.walls)
    };

    let assignment = assign_openings(
        &mut edges,
        &plan.doors,
        &plan.windows,
        &converter,
        &config.openings,
    );

    let palettes: FxHashMap<&str, Palette> = plan
        .rooms
        .iter()
        .map(|r| (r.id.as_str(), palette_for(plan.finish_for(&r.id))))
        .collect();

    let floors = build_floors(&plan.rooms, &palettes, &converter, config);
    let walls = build_wall_pieces(&edges, &palettes, config);
    let corner_posts = build_corner_posts(&edges, &palettes, config);
    let fixtures = build_fixtures(plan, &edges, &assignment, config);
    let furniture = build_furniture(plan, &converter);

    let bounds = scene_bounds(plan, &edges, &converter, config.scene.bounds_margin);
    let ground = GroundPlane {
        center: Point3D::new(bounds.center_x, 0.0, bounds.center_z),
        size: bounds.max_extent() * config.scene.ground_scale,
        material: GROUND,
    };

    let scene = SceneDescription {
        floors,
        walls,
        corner_posts,
        fixtures,
        furniture,
        ground,
        bounds,
        edges,
    };

    let stats = scene.stats();
    info!(
        floors = stats.floors,
        wall_edges = stats.wall_edges,
        wall_segments = stats.wall_segments,
        fixtures = stats.fixtures,
        unattached = stats.unattached_openings,
        furniture = stats.furniture,
        "scene assembled"
    );

    scene
}

fn build_floors(
    rooms: &[Room],
    palettes: &FxHashMap<&str, Palette>,
    converter: &CoordinateConverter,
    config: &PipelineConfig,
) -> Vec<FloorSurface> {
    rooms
        .iter()
        .filter_map(|room| {
            if room.vertices.len() < 3 {
                debug!(room = %room.id, "room has fewer than 3 vertices, no floor");
                return None;
            }
            let vertices = room
                .vertices
                .iter()
                .map(|v| converter.to_scene(*v, config.scene.floor_offset))
                .collect();

            Some(FloorSurface {
                room_id: room.id.clone(),
                name: room.name.clone(),
                vertices,
                area: converter.area_to_sq_ft(Room::calculate_area(&room.vertices)),
                material: palettes
                    .get(room.id.as_str())
                    .map(|p| p.floor)
                    .unwrap_or_else(|| Palette::default().floor),
            })
        })
        .collect()
}

/// Wall material of the first adjoining room that has one
fn wall_material(edge: &WallEdge, palettes: &FxHashMap<&str, Palette>) -> Material {
    edge.room_ids
        .iter()
        .find_map(|id| palettes.get(id.as_str()))
        .map(|p| p.wall)
        .unwrap_or(DEFAULT_WALL)
}

fn build_wall_pieces(
    edges: &[WallEdge],
    palettes: &FxHashMap<&str, Palette>,
    config: &PipelineConfig,
) -> Vec<WallPiece> {
    let mut pieces = Vec::new();

    for edge in edges {
        let material = wall_material(edge, palettes);
        let segments = segment_wall(
            edge.length,
            edge.height,
            &edge.openings,
            config.openings.segment_epsilon,
        );

        for segment in segments {
            let base = edge.point_at(segment.center_pos());
            pieces.push(WallPiece {
                edge_id: edge.id.clone(),
                kind: segment.kind,
                primitive: Primitive::Box {
                    center: base.with_y((segment.bottom_height + segment.top_height) / 2.0),
                    size: Dimensions::new(segment.length, segment.height(), edge.thickness),
                    rotation_y: -edge.angle,
                    material,
                },
            });
        }
    }

    pieces
}

/// A post at every distinct wall endpoint, as thick as the thickest wall and
/// as tall as the tallest wall meeting there. Posts take the finish of the
/// first wall that reaches them.
fn build_corner_posts(
    edges: &[WallEdge],
    palettes: &FxHashMap<&str, Palette>,
    config: &PipelineConfig,
) -> Vec<Primitive> {
    let precision = config.walls.key_precision;
    let mut index: FxHashMap<(i64, i64), usize> = FxHashMap::default();
    let mut posts: Vec<(Point3D, f64, f64, Material)> = Vec::new();

    for edge in edges {
        let material = wall_material(edge, palettes);
        for p in [edge.start, edge.end] {
            let key = ((p.x * precision).round() as i64, (p.z * precision).round() as i64);
            match index.get(&key) {
                Some(&i) => {
                    let post = &mut posts[i];
                    post.1 = post.1.max(edge.thickness);
                    post.2 = post.2.max(edge.height);
                }
                None => {
                    index.insert(key, posts.len());
                    posts.push((p, edge.thickness, edge.height, material));
                }
            }
        }
    }

    posts
        .into_iter()
        .map(|(p, thickness, height, material)| Primitive::Box {
            center: p.with_y(height / 2.0),
            size: Dimensions::new(thickness, height, thickness),
            rotation_y: 0.0,
            material,
        })
        .collect()
}

fn fixture_style(kind: OpeningKind, type_name: &str) -> FixtureStyle {
    match kind {
        OpeningKind::Door => FixtureStyle::Door(DoorStyle::from_type(type_name)),
        OpeningKind::Window => FixtureStyle::Window(WindowStyle::from_type(type_name)),
    }
}

fn fixture_parts(style: FixtureStyle, width: f64, height: f64, thickness: f64) -> Vec<Primitive> {
    match style {
        FixtureStyle::Door(s) => s.parts(width, height, thickness),
        FixtureStyle::Window(s) => s.parts(width, height, thickness),
    }
}

fn build_fixtures(
    plan: &FloorPlan,
    edges: &[WallEdge],
    assignment: &OpeningAssignment,
    config: &PipelineConfig,
) -> Vec<Fixture> {
    let type_names: FxHashMap<&str, &str> = plan
        .doors
        .iter()
        .map(|d| (d.id.as_str(), d.door_type.as_str()))
        .chain(plan.windows.iter().map(|w| (w.id.as_str(), w.window_type.as_str())))
        .collect();
    let type_of = |id: &str| type_names.get(id).copied().unwrap_or_default();

    let mut fixtures = Vec::new();

    for edge in edges {
        for opening in &edge.openings {
            let style = fixture_style(opening.kind, type_of(&opening.item_id));
            fixtures.push(Fixture {
                item_id: opening.item_id.clone(),
                kind: opening.kind,
                style,
                attached: true,
                edge_id: Some(edge.id.clone()),
                position: edge.point_at(opening.position).with_y(opening.bottom_offset),
                rotation_y: -edge.angle,
                width: opening.width,
                height: opening.height,
                parts: fixture_parts(style, opening.width, opening.height, edge.thickness),
            });
        }
    }

    for free in &assignment.unattached {
        fixtures.push(free_fixture(free, type_of(&free.item_id), config));
    }

    fixtures
}

fn free_fixture(free: &FreeOpening, type_name: &str, config: &PipelineConfig) -> Fixture {
    let style = fixture_style(free.kind, type_name);
    Fixture {
        item_id: free.item_id.clone(),
        kind: free.kind,
        style,
        attached: false,
        edge_id: None,
        position: free.position.with_y(free.bottom_offset),
        rotation_y: -free.heading,
        width: free.width,
        height: free.height,
        parts: fixture_parts(style, free.width, free.height, config.walls.default_thickness),
    }
}

fn build_furniture(plan: &FloorPlan, converter: &CoordinateConverter) -> Vec<FurnitureModel> {
    plan.furniture
        .iter()
        .filter_map(|item| {
            if !(item.width > 0.0) || !(item.depth > 0.0) {
                debug!(item = %item.id, "furniture with empty footprint, skipping");
                return None;
            }
            let spec = furniture_spec(&item.furniture_type);
            Some(FurnitureModel {
                item_id: item.id.clone(),
                kind: spec.kind,
                position: converter.to_scene(item.position(), 0.0),
                rotation_y: -rotation_to_scene(item.rotation),
                height: spec.height,
                parts: spec.build(item.width, item.depth),
            })
        })
        .collect()
}

fn scene_bounds(
    plan: &FloorPlan,
    edges: &[WallEdge],
    converter: &CoordinateConverter,
    margin: f64,
) -> SceneBounds {
    let points: Vec<Point3D> = plan
        .corners
        .iter()
        .map(|c| converter.to_scene(c.position(), 0.0))
        .chain(
            plan.rooms
                .iter()
                .flat_map(|r| r.vertices.iter().map(|v| converter.to_scene(*v, 0.0))),
        )
        .chain(edges.iter().flat_map(|e| [e.start, e.end]))
        .collect();

    SceneBounds::from_points(&points, margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Corner, Door, Furniture, Point2D, RoomFinish, Wall, WallType, Window};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn rect_room(id: &str, x: f64, y: f64, w: f64, h: f64) -> Room {
        Room::from_vertices(
            id,
            vec![
                Point2D::new(x, y),
                Point2D::new(x + w, y),
                Point2D::new(x + w, y + h),
                Point2D::new(x, y + h),
            ],
        )
    }

    fn polygon_plan() -> FloorPlan {
        FloorPlan {
            rooms: vec![rect_room("r1", 0.0, 0.0, 400.0, 300.0)],
            ..Default::default()
        }
    }

    fn furniture(id: &str, kind: &str, width: f64, depth: f64) -> Furniture {
        Furniture {
            id: id.into(),
            furniture_type: kind.into(),
            x: 200.0,
            y: 150.0,
            rotation: 0.0,
            width,
            depth,
        }
    }

    #[test]
    fn test_single_room_scene() {
        let scene = assemble_scene(&polygon_plan(), &PipelineConfig::default());

        assert_eq!(scene.floors.len(), 1);
        assert_abs_diff_eq!(scene.floors[0].area, 300.0, epsilon = 1e-9);
        assert!(scene.floors[0].vertices.iter().all(|v| v.y == 0.01));

        assert_eq!(scene.edges.len(), 4);
        assert_eq!(scene.walls.len(), 4);
        assert!(scene.walls.iter().all(|w| w.kind == SegmentKind::Full));
        assert_eq!(scene.corner_posts.len(), 4);

        // 20 x 15 ft room padded by 5 ft
        assert_abs_diff_eq!(scene.bounds.width, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(scene.bounds.depth, 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(scene.ground.size, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wall_boxes_follow_edges() {
        let scene = assemble_scene(&polygon_plan(), &PipelineConfig::default());

        for piece in &scene.walls {
            let edge = scene.edges.iter().find(|e| e.id == piece.edge_id).unwrap();
            match piece.primitive {
                Primitive::Box { center, size, rotation_y, .. } => {
                    assert_abs_diff_eq!(size.width, edge.length, epsilon = 1e-9);
                    assert_abs_diff_eq!(size.height, 9.0);
                    assert_abs_diff_eq!(size.depth, 0.5);
                    assert_abs_diff_eq!(center.y, 4.5);
                    assert_abs_diff_eq!(rotation_y, -edge.angle);
                    let mid = edge.point_at(edge.length / 2.0);
                    assert_abs_diff_eq!(center.distance_xz(&mid), 0.0, epsilon = 1e-9);
                }
                _ => panic!("wall pieces are boxes"),
            }
        }
    }

    #[test]
    fn test_door_cuts_host_wall() {
        let mut plan = polygon_plan();
        plan.doors.push(Door {
            id: "d1".into(),
            door_type: "double".into(),
            x: 200.0,
            y: 0.0,
            rotation: 0.0,
            width: Some(4.0),
            height: None,
            wall_id: None,
        });

        let scene = assemble_scene(&plan, &PipelineConfig::default());
        assert_eq!(scene.walls.len(), 3 + 3);
        assert_eq!(scene.walls.iter().filter(|w| w.kind == SegmentKind::Header).count(), 1);

        let fixture = &scene.fixtures[0];
        assert!(fixture.attached);
        assert_eq!(fixture.style, FixtureStyle::Door(DoorStyle::Double));
        assert_abs_diff_eq!(fixture.position.y, 0.0);
        assert_abs_diff_eq!(fixture.position.x, -20.0, epsilon = 1e-9);
        assert_eq!(scene.stats().attached_openings, 1);
    }

    #[test]
    fn test_unattached_window_still_rendered() {
        let mut plan = polygon_plan();
        plan.windows.push(Window {
            id: "w1".into(),
            window_type: "picture".into(),
            x: 200.0,
            y: 150.0,
            rotation: 90.0,
            width: None,
            height: None,
            sill_height: Some(2.5),
            wall_id: None,
        });

        let scene = assemble_scene(&plan, &PipelineConfig::default());
        let stats = scene.stats();
        assert_eq!(stats.unattached_openings, 1);
        assert_eq!(stats.wall_segments, 4);

        let fixture = &scene.fixtures[0];
        assert!(!fixture.attached);
        assert_eq!(fixture.edge_id, None);
        assert_eq!(fixture.style, FixtureStyle::Window(WindowStyle::Picture));
        assert_abs_diff_eq!(fixture.position.y, 2.5);
        assert_abs_diff_eq!(fixture.rotation_y, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_furniture_is_default_box() {
        let mut plan = polygon_plan();
        plan.furniture.push(furniture("f1", "spaceship", 4.0, 3.0));

        let scene = assemble_scene(&plan, &PipelineConfig::default());
        let model = &scene.furniture[0];
        assert_eq!(model.kind, FurnitureKind::Generic);
        assert_eq!(model.height, 2.0);
        assert_eq!(model.parts.len(), 1);
        match model.parts[0] {
            Primitive::Box { size, material, .. } => {
                assert_eq!(size, Dimensions::new(4.0, 2.0, 3.0));
                assert_eq!(material.color, FurnitureKind::Generic.spec().color);
            }
            _ => panic!("expected a box"),
        }
    }

    #[test]
    fn test_empty_furniture_skipped() {
        let mut plan = polygon_plan();
        plan.furniture.push(furniture("f1", "bed", 0.0, 3.0));
        plan.furniture.push(furniture("f2", "bed", 5.0, 7.0));

        let scene = assemble_scene(&plan, &PipelineConfig::default());
        assert_eq!(scene.furniture.len(), 1);
        assert_eq!(scene.furniture[0].item_id, "f2");
        assert_eq!(scene.furniture[0].kind, FurnitureKind::Bed);
    }

    #[test]
    fn test_graph_plan_scene() {
        let corners = vec![
            Corner::new("a", 0.0, 0.0),
            Corner::new("b", 200.0, 0.0),
            Corner::new("c", 200.0, 200.0),
            Corner::new("d", 0.0, 200.0),
            Corner::new("e", 100.0, 0.0),
            Corner::new("f", 100.0, 200.0),
        ];
        let walls = vec![
            Wall::new("w1", "a", "e"),
            Wall::new("w2", "e", "b"),
            Wall::new("w3", "b", "c"),
            Wall::new("w4", "c", "f"),
            Wall::new("w5", "f", "d"),
            Wall::new("w6", "d", "a"),
            Wall::new("w7", "e", "f").with_type(WallType::Partition),
        ];
        let plan = FloorPlan {
            corners,
            walls,
            ..Default::default()
        };

        let scene = assemble_scene(&plan, &PipelineConfig::default());
        assert_eq!(scene.edges.len(), 7);
        assert_eq!(scene.walls.len(), 7);
        assert_eq!(scene.corner_posts.len(), 6);

        // Post where the partition meets the outer wall takes the outer height
        let tallest = scene
            .corner_posts
            .iter()
            .filter_map(|p| match p {
                Primitive::Box { size, .. } => Some(size.height),
                _ => None,
            })
            .fold(0.0, f64::max);
        assert_eq!(tallest, 9.0);

        let partition = scene.edges.iter().find(|e| e.wall_type == WallType::Partition).unwrap();
        assert_eq!(partition.height, 4.5);
    }

    #[test]
    fn test_finish_colors_floor_and_walls() {
        let mut plan = polygon_plan();
        plan.finishes.push(RoomFinish {
            room_id: "r1".into(),
            vibe: "industrial".into(),
            tier: "standard".into(),
        });

        let scene = assemble_scene(&plan, &PipelineConfig::default());
        let palette = palette_for(plan.finishes.first());
        assert_eq!(scene.floors[0].material, palette.floor);
        assert!(scene.walls.iter().all(|w| *w.primitive.material() == palette.wall));

        assert_ne!(palette.wall, DEFAULT_WALL);
        assert_eq!(scene.corner_posts.len(), 4);
        assert!(scene.corner_posts.iter().all(|p| *p.material() == palette.wall));
    }

    #[test]
    fn test_degenerate_input_never_fails() {
        let mut plan = polygon_plan();
        plan.rooms.push(Room::from_vertices("line", vec![Point2D::new(0.0, 0.0), Point2D::new(5.0, 5.0)]));
        plan.rooms.push(rect_room("dot", 10.0, 10.0, 0.5, 0.5));

        let scene = assemble_scene(&plan, &PipelineConfig::default());
        assert_eq!(scene.floors.len(), 2);
        assert_eq!(scene.edges.len(), 4);

        let empty = assemble_scene(&FloorPlan::default(), &PipelineConfig::default());
        assert!(empty.walls.is_empty());
        assert_abs_diff_eq!(empty.bounds.width, 10.0);
        assert_abs_diff_eq!(empty.ground.size, 30.0);
    }

    #[test]
    fn test_primitive_transform() {
        let local = Primitive::Box {
            center: Point3D::new(1.0, 0.5, 0.0),
            size: Dimensions::new(1.0, 1.0, 1.0),
            rotation_y: 0.0,
            material: DEFAULT_WALL,
        };
        let placed = local.transformed(Point3D::new(10.0, 0.0, 10.0), FRAC_PI_2);
        let c = placed.center();
        // Local +X maps to -Z after a quarter turn about +Y
        assert_abs_diff_eq!(c.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scene_serializes() {
        let scene = assemble_scene(&polygon_plan(), &PipelineConfig::default());
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["walls"][0]["primitive"]["shape"], "box");
        assert!(json["walls"][0]["primitive"]["rotationY"].is_number());
        assert!(json["cornerPosts"].is_array());
    }
}
