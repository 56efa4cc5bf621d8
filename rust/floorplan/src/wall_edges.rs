// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall edges: deduplicated physical walls in scene space, and the doors
//! and windows attached to them.
//!
//! Two inputs feed the builder. Polygon plans derive walls from room rings,
//! so a wall shared by two rooms shows up twice and is merged by key. Graph
//! plans list walls explicitly; virtual walls are dropped here and room ids
//! come from the rings that contain the wall.

use std::f64::consts::FRAC_PI_2;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::{OpeningConfig, WallConfig};
use crate::coords::{rotation_to_scene, undirected_angle_between, CoordinateConverter};
use crate::types::{
    Corner, Door, OpeningKind, Point2D, Point3D, Room, Wall, WallEdge, WallOpening, WallType,
    Window,
};

fn round_xz(p: &Point3D, precision: f64) -> (i64, i64) {
    (
        (p.x * precision).round() as i64,
        (p.z * precision).round() as i64,
    )
}

/// Order-independent key of a wall's two endpoints at a fixed precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    a: (i64, i64),
    b: (i64, i64),
}

impl EdgeKey {
    /// Key of `start`/`end` rounded to `1 / precision` feet in XZ
    pub fn new(start: &Point3D, end: &Point3D, precision: f64) -> Self {
        let (p, q) = (round_xz(start, precision), round_xz(end, precision));
        if p <= q {
            Self { a: p, b: q }
        } else {
            Self { a: q, b: p }
        }
    }

    /// Whether `start` is the key's first point
    fn is_forward(start: &Point3D, end: &Point3D, precision: f64) -> bool {
        round_xz(start, precision) <= round_xz(end, precision)
    }

    /// `"x1,z1:x2,z2"` in feet
    pub fn to_id(&self, precision: f64) -> String {
        let f = |v: i64| v as f64 / precision;
        format!(
            "{},{}:{},{}",
            f(self.a.0),
            f(self.a.1),
            f(self.b.0),
            f(self.b.1)
        )
    }
}

impl WallEdge {
    /// Unit direction from `start` to `end` in XZ
    pub fn direction(&self) -> (f64, f64) {
        (self.angle.cos(), self.angle.sin())
    }

    /// Point `distance` feet along the wall, at floor height
    pub fn point_at(&self, distance: f64) -> Point3D {
        let (dx, dz) = self.direction();
        Point3D::new(
            self.start.x + dx * distance,
            self.start.y,
            self.start.z + dz * distance,
        )
    }

    /// Project a scene point onto the wall: the along-wall distance clamped
    /// to `[0, length]` and the XZ distance to that clamped point.
    pub fn project(&self, p: &Point3D) -> (f64, f64) {
        let (dx, dz) = self.direction();
        let t = ((p.x - self.start.x) * dx + (p.z - self.start.z) * dz).clamp(0.0, self.length);
        let closest = self.point_at(t);
        (t, closest.distance_xz(p))
    }

    /// Insert keeping `openings` sorted by position; equal positions keep
    /// insertion order.
    pub fn insert_opening(&mut self, opening: WallOpening) {
        let idx = self
            .openings
            .partition_point(|o| o.position <= opening.position);
        self.openings.insert(idx, opening);
    }

    pub fn is_partition(&self) -> bool {
        self.wall_type == WallType::Partition
    }
}

/// Insertion-ordered edge set keyed by [`EdgeKey`]
#[derive(Debug, Default)]
struct EdgeSet {
    edges: Vec<WallEdge>,
    index: FxHashMap<EdgeKey, usize>,
}

impl EdgeSet {
    fn get_mut(&mut self, key: &EdgeKey) -> Option<&mut WallEdge> {
        let idx = *self.index.get(key)?;
        self.edges.get_mut(idx)
    }

    fn insert(&mut self, key: EdgeKey, edge: WallEdge) {
        self.index.insert(key, self.edges.len());
        self.edges.push(edge);
    }
}

struct EdgeSpec {
    thickness: f64,
    height: f64,
    wall_type: WallType,
    source_wall_id: Option<String>,
}

fn make_edge(
    key: &EdgeKey,
    start: Point3D,
    end: Point3D,
    spec: EdgeSpec,
    room_ids: SmallVec<[String; 2]>,
    config: &WallConfig,
) -> WallEdge {
    // Smaller point first so the same wall always runs the same way
    let (start, end) = if EdgeKey::is_forward(&start, &end, config.key_precision) {
        (start, end)
    } else {
        (end, start)
    };

    WallEdge {
        id: key.to_id(config.key_precision),
        start,
        end,
        room_ids,
        openings: Vec::new(),
        length: start.distance_xz(&end),
        angle: (end.z - start.z).atan2(end.x - start.x),
        thickness: spec.thickness,
        height: spec.height,
        wall_type: spec.wall_type,
        source_wall_id: spec.source_wall_id,
    }
}

fn ring_segments(vertices: &[Point2D]) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Wall edges from room polygons; walls shared by two rooms are merged.
pub fn build_polygon_edges(
    rooms: &[Room],
    converter: &CoordinateConverter,
    config: &WallConfig,
) -> Vec<WallEdge> {
    let mut set = EdgeSet::default();

    for room in rooms {
        if room.vertices.len() < 3 {
            debug!(room = %room.id, "room has fewer than 3 vertices, no walls");
            continue;
        }

        for (p, q) in ring_segments(&room.vertices) {
            let start = converter.to_scene(p, 0.0);
            let end = converter.to_scene(q, 0.0);
            if start.distance_xz(&end) < config.min_wall_length {
                trace!(room = %room.id, "skipping short wall");
                continue;
            }

            let key = EdgeKey::new(&start, &end, config.key_precision);
            if let Some(edge) = set.get_mut(&key) {
                if !edge.room_ids.iter().any(|id| id == &room.id) {
                    edge.room_ids.push(room.id.clone());
                }
                continue;
            }

            let spec = EdgeSpec {
                thickness: config.default_thickness,
                height: config.ceiling_height,
                wall_type: WallType::Solid,
                source_wall_id: None,
            };
            let mut room_ids = SmallVec::new();
            room_ids.push(room.id.clone());
            set.insert(key, make_edge(&key, start, end, spec, room_ids, config));
        }
    }

    set.edges
}

/// Wall edges from an explicit corner/wall graph. Virtual walls are dropped;
/// room ids come from the room rings that run along each wall.
pub fn build_graph_edges(
    corners: &[Corner],
    walls: &[Wall],
    rooms: &[Room],
    converter: &CoordinateConverter,
    config: &WallConfig,
) -> Vec<WallEdge> {
    let positions: FxHashMap<&str, Point2D> = corners
        .iter()
        .map(|c| (c.id.as_str(), c.position()))
        .collect();

    let mut rooms_by_key: FxHashMap<EdgeKey, SmallVec<[String; 2]>> = FxHashMap::default();
    for room in rooms.iter().filter(|r| r.vertices.len() >= 3) {
        for (p, q) in ring_segments(&room.vertices) {
            let key = EdgeKey::new(
                &converter.to_scene(p, 0.0),
                &converter.to_scene(q, 0.0),
                config.key_precision,
            );
            let ids = rooms_by_key.entry(key).or_default();
            if !ids.iter().any(|id| id == &room.id) {
                ids.push(room.id.clone());
            }
        }
    }

    let mut set = EdgeSet::default();

    for wall in walls {
        if wall.wall_type == WallType::Virtual {
            continue;
        }

        let (Some(p), Some(q)) = (
            positions.get(wall.start_corner_id.as_str()),
            positions.get(wall.end_corner_id.as_str()),
        ) else {
            debug!(wall = %wall.id, "wall references an unknown corner, skipping");
            continue;
        };

        let start = converter.to_scene(*p, 0.0);
        let end = converter.to_scene(*q, 0.0);
        if start.distance_xz(&end) < config.min_wall_length {
            debug!(wall = %wall.id, "wall shorter than minimum length, skipping");
            continue;
        }

        let key = EdgeKey::new(&start, &end, config.key_precision);
        if set.get_mut(&key).is_some() {
            trace!(wall = %wall.id, "duplicate wall, keeping the first");
            continue;
        }

        let default_height = match wall.wall_type {
            WallType::Partition => config.partition_height(),
            _ => config.ceiling_height,
        };
        let spec = EdgeSpec {
            thickness: wall
                .thickness
                .filter(|t| *t > 0.0)
                .unwrap_or(config.default_thickness),
            height: wall.height.filter(|h| *h > 0.0).unwrap_or(default_height),
            wall_type: wall.wall_type,
            source_wall_id: Some(wall.id.clone()),
        };
        let room_ids = rooms_by_key.get(&key).cloned().unwrap_or_default();
        set.insert(key, make_edge(&key, start, end, spec, room_ids, config));
    }

    set.edges
}

/// A door or window that found no host wall; rendered where it was placed
#[derive(Debug, Clone, PartialEq)]
pub struct FreeOpening {
    pub kind: OpeningKind,
    pub item_id: String,
    /// Scene position at floor height
    pub position: Point3D,
    /// Scene heading, radians
    pub heading: f64,
    pub width: f64,
    pub height: f64,
    pub bottom_offset: f64,
}

/// Outcome of [`assign_openings`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpeningAssignment {
    pub attached: usize,
    pub unattached: Vec<FreeOpening>,
}

struct OpeningItem<'a> {
    kind: OpeningKind,
    id: &'a str,
    position: Point2D,
    rotation: f64,
    width: f64,
    height: f64,
    bottom_offset: f64,
    wall_hint: Option<&'a str>,
}

/// Attach doors and windows to their host edges.
///
/// A host must be within `attach_distance` of the item, and the item's
/// rotation must be within `rotation_tolerance_deg` of parallel or of
/// perpendicular to the wall, since items are drawn facing either way. The closest
/// such edge wins; ties keep the earlier edge. A `wall_id` hint naming a
/// non-partition edge within range takes precedence. Partition walls never
/// host openings.
pub fn assign_openings(
    edges: &mut [WallEdge],
    doors: &[Door],
    windows: &[Window],
    converter: &CoordinateConverter,
    config: &OpeningConfig,
) -> OpeningAssignment {
    let items = doors
        .iter()
        .map(|d| OpeningItem {
            kind: OpeningKind::Door,
            id: &d.id,
            position: Point2D::new(d.x, d.y),
            rotation: d.rotation,
            width: positive_or(d.width, config.door_width),
            height: positive_or(d.height, config.door_height),
            bottom_offset: 0.0,
            wall_hint: d.wall_id.as_deref(),
        })
        .chain(windows.iter().map(|w| OpeningItem {
            kind: OpeningKind::Window,
            id: &w.id,
            position: Point2D::new(w.x, w.y),
            rotation: w.rotation,
            width: positive_or(w.width, config.window_width),
            height: positive_or(w.height, config.window_height),
            bottom_offset: w
                .sill_height
                .filter(|s| *s >= 0.0)
                .unwrap_or(config.window_sill_height),
            wall_hint: w.wall_id.as_deref(),
        }));

    let mut result = OpeningAssignment::default();

    for item in items {
        let point = converter.to_scene(item.position, 0.0);
        let heading = rotation_to_scene(item.rotation);

        match find_host(edges, &point, heading, item.wall_hint, config) {
            Some((idx, position)) => {
                trace!(item = item.id, edge = %edges[idx].id, position, "attached opening");
                edges[idx].insert_opening(WallOpening {
                    kind: item.kind,
                    position,
                    width: item.width,
                    height: item.height,
                    bottom_offset: item.bottom_offset,
                    item_id: item.id.to_string(),
                });
                result.attached += 1;
            }
            None => {
                debug!(item = item.id, "no host wall in range, placing free-standing");
                result.unattached.push(FreeOpening {
                    kind: item.kind,
                    item_id: item.id.to_string(),
                    position: point,
                    heading,
                    width: item.width,
                    height: item.height,
                    bottom_offset: item.bottom_offset,
                });
            }
        }
    }

    result
}

/// Within `tolerance` of parallel or of perpendicular, either direction
fn rotation_compatible(wall_angle: f64, heading: f64, tolerance: f64) -> bool {
    let off_parallel = undirected_angle_between(wall_angle, heading);
    off_parallel <= tolerance + 1e-9 || (FRAC_PI_2 - off_parallel).abs() <= tolerance + 1e-9
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| *v > 0.0).unwrap_or(default)
}

/// Host edge index and clamped along-wall position
fn find_host(
    edges: &[WallEdge],
    point: &Point3D,
    heading: f64,
    hint: Option<&str>,
    config: &OpeningConfig,
) -> Option<(usize, f64)> {
    if let Some(hint) = hint {
        let hinted = edges.iter().enumerate().find(|(_, e)| {
            !e.is_partition() && (e.source_wall_id.as_deref() == Some(hint) || e.id == hint)
        });
        if let Some((idx, edge)) = hinted {
            let (t, distance) = edge.project(point);
            if distance <= config.attach_distance {
                return Some((idx, t));
            }
        }
    }

    let tolerance = config.rotation_tolerance_deg.to_radians();
    let mut best: Option<(usize, f64, f64)> = None;

    for (idx, edge) in edges.iter().enumerate() {
        if edge.is_partition() || !rotation_compatible(edge.angle, heading, tolerance) {
            continue;
        }
        let (t, distance) = edge.project(point);
        if distance > config.attach_distance {
            continue;
        }
        if best.map_or(true, |(_, _, d)| distance < d) {
            best = Some((idx, t, distance));
        }
    }

    best.map(|(idx, t, _)| (idx, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CoordinateConfig;
    use approx::assert_abs_diff_eq;

    fn converter() -> CoordinateConverter {
        CoordinateConverter::new(&CoordinateConfig::default())
    }

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

    fn door(id: &str, x: f64, y: f64, rotation: f64) -> Door {
        Door {
            id: id.into(),
            door_type: String::new(),
            x,
            y,
            rotation,
            width: None,
            height: None,
            wall_id: None,
        }
    }

    #[test]
    fn test_edge_key_is_order_independent() {
        let p = Point3D::new(1.004, 0.0, 2.0);
        let q = Point3D::new(-3.0, 5.0, 7.5);
        assert_eq!(
            EdgeKey::new(&p, &q, 100.0),
            EdgeKey::new(&q, &Point3D::new(1.0, 0.0, 2.001), 100.0)
        );
        assert_eq!(EdgeKey::new(&p, &q, 100.0).to_id(100.0), "-3,7.5:1,2");
    }

    #[test]
    fn test_single_room_polygon_edges() {
        // 20 x 15 ft
        let rooms = vec![rect_room("r1", 0.0, 0.0, 400.0, 300.0)];
        let edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());

        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| e.room_ids.len() == 1));
        let perimeter: f64 = edges.iter().map(|e| e.length).sum();
        assert_abs_diff_eq!(perimeter, 70.0, epsilon = 1e-9);
        assert!(edges.iter().all(|e| e.thickness == 0.5 && e.height == 9.0));
    }

    #[test]
    fn test_shared_wall_deduplicated() {
        let rooms = vec![
            rect_room("r1", 0.0, 0.0, 200.0, 200.0),
            rect_room("r2", 200.0, 0.0, 200.0, 200.0),
        ];
        let edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());

        assert_eq!(edges.len(), 7);
        let shared: Vec<_> = edges.iter().filter(|e| e.room_ids.len() == 2).collect();
        assert_eq!(shared.len(), 1);
        assert_abs_diff_eq!(shared[0].length, 10.0, epsilon = 1e-9);
        assert_eq!(shared[0].room_ids.as_slice(), ["r1", "r2"]);
    }

    #[test]
    fn test_degenerate_room_skipped() {
        let mut room = rect_room("r", 0.0, 0.0, 100.0, 100.0);
        room.vertices.truncate(2);
        assert!(build_polygon_edges(&[room], &converter(), &WallConfig::default()).is_empty());
    }

    #[test]
    fn test_edges_run_from_smaller_point() {
        let rooms = vec![rect_room("r1", 0.0, 0.0, 400.0, 300.0)];
        for edge in build_polygon_edges(&rooms, &converter(), &WallConfig::default()) {
            let key = EdgeKey::new(&edge.start, &edge.end, 100.0);
            assert_eq!(round_xz(&edge.start, 100.0), key.a);
            assert_abs_diff_eq!(edge.point_at(edge.length).distance_xz(&edge.end), 0.0, epsilon = 1e-9);
        }
    }

    fn graph() -> (Vec<Corner>, Vec<Wall>, Vec<Room>) {
        let corners = vec![
            Corner::new("a", 0.0, 0.0),
            Corner::new("b", 200.0, 0.0),
            Corner::new("c", 400.0, 0.0),
            Corner::new("d", 400.0, 200.0),
            Corner::new("e", 200.0, 200.0),
            Corner::new("f", 0.0, 200.0),
        ];
        let mut thick = Wall::new("w1", "a", "b");
        thick.thickness = Some(0.75);
        let walls = vec![
            thick,
            Wall::new("w2", "b", "c"),
            Wall::new("w3", "c", "d"),
            Wall::new("w4", "d", "e"),
            Wall::new("w5", "e", "f"),
            Wall::new("w6", "f", "a"),
            Wall::new("w7", "b", "e").with_type(WallType::Partition),
            Wall::new("w8", "a", "missing"),
        ];
        let mut left = rect_room("left", 0.0, 0.0, 200.0, 200.0);
        left.corner_ids = vec!["a".into(), "b".into(), "e".into(), "f".into()];
        let mut right = rect_room("right", 200.0, 0.0, 200.0, 200.0);
        right.corner_ids = vec!["b".into(), "c".into(), "d".into(), "e".into()];
        (corners, walls, vec![left, right])
    }

    #[test]
    fn test_graph_edges() {
        let (corners, walls, rooms) = graph();
        let edges = build_graph_edges(&corners, &walls, &rooms, &converter(), &WallConfig::default());

        assert_eq!(edges.len(), 7);
        assert_eq!(edges[0].source_wall_id.as_deref(), Some("w1"));
        assert_eq!(edges[0].thickness, 0.75);
        assert_eq!(edges[1].thickness, 0.5);

        let partition = edges.iter().find(|e| e.is_partition()).unwrap();
        assert_eq!(partition.height, 4.5);
        assert_eq!(partition.room_ids.len(), 2);

        let exterior = edges.iter().filter(|e| e.room_ids.len() == 1).count();
        assert_eq!(exterior, 6);
    }

    #[test]
    fn test_virtual_walls_not_rendered() {
        let (corners, mut walls, rooms) = graph();
        walls[6] = Wall::new("w7", "b", "e").with_type(WallType::Virtual);
        let edges = build_graph_edges(&corners, &walls, &rooms, &converter(), &WallConfig::default());
        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|e| e.wall_type == WallType::Solid));
    }

    #[test]
    fn test_door_attaches_to_nearest_parallel_wall() {
        let rooms = vec![rect_room("r1", 0.0, 0.0, 200.0, 200.0)];
        let mut edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());

        // 1 ft inside the top wall, 3 ft from the left end
        let doors = vec![door("d1", 60.0, 20.0, 0.0)];
        let result = assign_openings(&mut edges, &doors, &[], &converter(), &OpeningConfig::default());

        assert_eq!(result.attached, 1);
        assert!(result.unattached.is_empty());
        let host: Vec<_> = edges.iter().filter(|e| !e.openings.is_empty()).collect();
        assert_eq!(host.len(), 1);
        assert_abs_diff_eq!(host[0].angle.sin(), 0.0, epsilon = 1e-12);
        let opening = &host[0].openings[0];
        assert_eq!(opening.item_id, "d1");
        assert_eq!(opening.width, 3.0);
        assert_eq!(opening.height, 7.0);
        assert_abs_diff_eq!(
            host[0].point_at(opening.position).x,
            converter().to_scene(Point2D::new(60.0, 0.0), 0.0).x,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rotation_and_distance_limits() {
        let rooms = vec![rect_room("r1", 0.0, 0.0, 200.0, 200.0)];
        let mut edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());

        let doors = vec![
            // Drawn at right angles to the top wall
            door("perpendicular", 100.0, 10.0, 90.0),
            // Parallel but 3 ft away from every wall
            door("far", 100.0, 60.0, 0.0),
            // Anti-parallel, 40 degrees off
            door("flipped", 60.0, 10.0, 220.0),
        ];
        let result = assign_openings(&mut edges, &doors, &[], &converter(), &OpeningConfig::default());

        assert_eq!(result.attached, 2);
        let ids: Vec<_> = result.unattached.iter().map(|o| o.item_id.as_str()).collect();
        assert_eq!(ids, ["far"]);

        let host = edges.iter().find(|e| !e.openings.is_empty()).unwrap();
        assert_abs_diff_eq!(host.angle.sin(), 0.0, epsilon = 1e-12);
        let hosted: Vec<_> = host.openings.iter().map(|o| o.item_id.as_str()).collect();
        assert_eq!(hosted, ["flipped", "perpendicular"]);
        assert_abs_diff_eq!(host.openings[1].position, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tight_rotation_tolerance() {
        let rooms = vec![rect_room("r1", 0.0, 0.0, 200.0, 200.0)];
        let mut edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());
        let config = OpeningConfig {
            rotation_tolerance_deg: 20.0,
            ..OpeningConfig::default()
        };

        let doors = vec![
            // Halfway between parallel and perpendicular
            door("diagonal", 100.0, 10.0, 45.0),
            // 10 degrees off perpendicular
            door("near-square", 60.0, 10.0, 100.0),
        ];
        let result = assign_openings(&mut edges, &doors, &[], &converter(), &config);

        assert_eq!(result.attached, 1);
        assert_eq!(result.unattached.len(), 1);
        assert_eq!(result.unattached[0].item_id, "diagonal");
        assert_abs_diff_eq!(result.unattached[0].heading, rotation_to_scene(45.0));
    }

    #[test]
    fn test_partition_never_hosts() {
        let (corners, walls, rooms) = graph();
        let mut edges = build_graph_edges(&corners, &walls, &rooms, &converter(), &WallConfig::default());

        // On the partition b-e, which runs vertically
        let mut d = door("d", 200.0, 100.0, 90.0);
        d.wall_id = Some("w7".into());
        let result = assign_openings(&mut edges, &[d], &[], &converter(), &OpeningConfig::default());

        assert_eq!(result.attached, 0);
        assert!(edges.iter().all(|e| e.openings.is_empty()));
    }

    #[test]
    fn test_hint_takes_precedence() {
        let rooms = vec![rect_room("r1", 0.0, 0.0, 200.0, 200.0)];
        let mut edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());
        let left_wall = edges
            .iter()
            .find(|e| e.angle.cos().abs() < 1e-9 && e.start.x < -25.0)
            .map(|e| e.id.clone())
            .unwrap();

        // Near the top-left corner, closest to the top wall by rotation
        let mut d = door("d", 10.0, 5.0, 0.0);
        d.wall_id = Some(left_wall.clone());
        assign_openings(&mut edges, &[d], &[], &converter(), &OpeningConfig::default());

        let host = edges.iter().find(|e| !e.openings.is_empty()).unwrap();
        assert_eq!(host.id, left_wall);
    }

    #[test]
    fn test_openings_sorted_and_clamped() {
        let rooms = vec![rect_room("r1", 0.0, 0.0, 200.0, 200.0)];
        let mut edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());

        let doors = vec![door("late", 160.0, 0.0, 0.0), door("past-end", 215.0, 0.0, 0.0)];
        let windows = vec![Window {
            id: "early".into(),
            window_type: String::new(),
            x: 40.0,
            y: 0.0,
            rotation: 180.0,
            width: Some(2.0),
            height: None,
            sill_height: None,
            wall_id: None,
        }];
        assign_openings(&mut edges, &doors, &windows, &converter(), &OpeningConfig::default());

        let host = edges.iter().find(|e| !e.openings.is_empty()).unwrap();
        let ids: Vec<_> = host.openings.iter().map(|o| o.item_id.as_str()).collect();
        assert_eq!(ids, ["early", "late", "past-end"]);
        assert!(host.openings.windows(2).all(|w| w[0].position <= w[1].position));
        assert_abs_diff_eq!(host.openings[2].position, host.length);
        assert_eq!(host.openings[0].bottom_offset, 3.0);
        assert_eq!(host.openings[0].height, 4.0);
    }

    #[test]
    fn test_attachment_is_deterministic() {
        let rooms = vec![
            rect_room("r1", 0.0, 0.0, 200.0, 200.0),
            rect_room("r2", 200.0, 0.0, 200.0, 200.0),
        ];
        let doors = vec![door("d", 200.0, 100.0, 90.0)];

        let run = || {
            let mut edges = build_polygon_edges(&rooms, &converter(), &WallConfig::default());
            assign_openings(&mut edges, &doors, &[], &converter(), &OpeningConfig::default());
            edges
                .iter()
                .find(|e| !e.openings.is_empty())
                .map(|e| e.id.clone())
        };

        let first = run();
        assert!(first.is_some());
        for _ in 0..5 {
            assert_eq!(run(), first);
        }
    }
}
