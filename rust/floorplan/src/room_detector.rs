// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room detection by planar face tracing over the corner/wall graph.
//!
//! 1. Build an arena graph: corner index ↔ id, an edge list, per-vertex
//!    neighbor lists. Walls with unknown corners, self-loops, zero-length
//!    walls and duplicates are dropped.
//! 2. Prune dangling filaments by repeatedly removing degree-1 vertices.
//! 3. Sort each vertex's neighbors by angle and walk every directed edge,
//!    turning to the neighbor preceding the one we came from. Each orbit is
//!    one face.
//! 4. Outer faces come out with negative signed area and are discarded, as
//!    are faces with fewer than 3 distinct corners or too little area.
//!
//! Virtual walls take part like any other wall. Crossing walls without a
//! shared corner are not split; the result for self-intersecting input is
//! unspecified.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use tracing::{debug, trace};

use crate::config::DetectionConfig;
use crate::coords::CoordinateConverter;
use crate::types::{signed_area, Corner, Point2D, Room, Wall, DEFAULT_ROOM_TYPE};

/// Corners closer than this (editor units) are treated as coincident
const MIN_EDGE_LENGTH: f64 = 1e-9;

/// Arena-backed undirected wall graph
#[derive(Debug, Default)]
struct WallGraph<'a> {
    ids: Vec<&'a str>,
    positions: Vec<Point2D>,
    edges: Vec<[usize; 2]>,
}

impl<'a> WallGraph<'a> {
    fn build(corners: &'a [Corner], walls: &[Wall]) -> Self {
        let mut graph = WallGraph::default();
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();

        for corner in corners {
            if index.contains_key(corner.id.as_str()) {
                trace!(corner = %corner.id, "duplicate corner id, keeping the first");
                continue;
            }
            index.insert(corner.id.as_str(), graph.ids.len());
            graph.ids.push(corner.id.as_str());
            graph.positions.push(corner.position());
        }

        let mut seen: FxHashSet<[usize; 2]> = FxHashSet::default();
        for wall in walls {
            let (Some(&a), Some(&b)) = (
                index.get(wall.start_corner_id.as_str()),
                index.get(wall.end_corner_id.as_str()),
            ) else {
                debug!(wall = %wall.id, "wall references an unknown corner, skipping");
                continue;
            };

            if a == b || graph.positions[a].distance_to(&graph.positions[b]) < MIN_EDGE_LENGTH {
                debug!(wall = %wall.id, "degenerate wall, skipping");
                continue;
            }

            let key = [a.min(b), a.max(b)];
            if seen.insert(key) {
                graph.edges.push(key);
            }
        }

        graph
    }

    /// Drop edges hanging off the graph by a degree-1 vertex, repeatedly,
    /// until every remaining vertex closes at least one cycle.
    fn prune_filaments(&mut self) {
        let mut degree = vec![0usize; self.ids.len()];
        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); self.ids.len()];
        for (e, &[a, b]) in self.edges.iter().enumerate() {
            degree[a] += 1;
            degree[b] += 1;
            incident[a].push(e);
            incident[b].push(e);
        }

        let mut alive = vec![true; self.edges.len()];
        let mut stack: Vec<usize> = (0..degree.len()).filter(|&v| degree[v] == 1).collect();

        while let Some(v) = stack.pop() {
            if degree[v] != 1 {
                continue;
            }
            let Some(&e) = incident[v].iter().find(|&&e| alive[e]) else {
                continue;
            };
            alive[e] = false;

            let [a, b] = self.edges[e];
            let other = if a == v { b } else { a };
            degree[v] = 0;
            degree[other] -= 1;
            if degree[other] == 1 {
                stack.push(other);
            }
        }

        let before = self.edges.len();
        let mut e = 0;
        self.edges.retain(|_| {
            let keep = alive[e];
            e += 1;
            keep
        });

        if self.edges.len() < before {
            trace!(pruned = before - self.edges.len(), "pruned dangling walls");
        }
    }

    /// Neighbor lists sorted by ascending direction angle
    fn sorted_adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.ids.len()];
        for &[a, b] in &self.edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        for (v, neighbors) in adjacency.iter_mut().enumerate() {
            let origin = self.positions[v];
            neighbors.sort_by(|&p, &q| {
                let angle = |n: usize| {
                    let pos = self.positions[n];
                    (pos.y - origin.y).atan2(pos.x - origin.x)
                };
                angle(p).total_cmp(&angle(q))
            });
        }

        adjacency
    }

    /// Every face of the embedding as a vertex cycle
    fn trace_faces(&self) -> Vec<Vec<usize>> {
        let adjacency = self.sorted_adjacency();
        let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();
        let mut faces = Vec::new();

        for &[a, b] in &self.edges {
            for start in [(a, b), (b, a)] {
                if visited.contains(&start) {
                    continue;
                }

                let mut face = Vec::new();
                let (mut u, mut v) = start;
                while visited.insert((u, v)) {
                    face.push(u);

                    let neighbors = &adjacency[v];
                    let Some(i) = neighbors.iter().position(|&n| n == u) else {
                        break;
                    };
                    let next = neighbors[(i + neighbors.len() - 1) % neighbors.len()];
                    u = v;
                    v = next;
                }

                faces.push(face);
            }
        }

        faces
    }
}

/// Detect enclosed rooms from a corner/wall graph.
///
/// Rooms come back with a corner-set id, an empty name and the default type;
/// [`crate::reconcile::reconcile_rooms`] carries metadata over from a
/// previous run. Graphs below the configured minimum size yield no rooms.
pub fn detect_rooms(
    corners: &[Corner],
    walls: &[Wall],
    converter: &CoordinateConverter,
    config: &DetectionConfig,
) -> Vec<Room> {
    if corners.len() < config.min_corners || walls.len() < config.min_walls {
        debug!(
            corners = corners.len(),
            walls = walls.len(),
            "wall graph below minimum size, skipping room detection"
        );
        return Vec::new();
    }

    let mut graph = WallGraph::build(corners, walls);
    graph.prune_filaments();

    let mut rooms = Vec::new();
    let mut seen_ids: FxHashSet<String> = FxHashSet::default();

    for face in graph.trace_faces() {
        let Some(room) = face_to_room(&graph, &face, converter, config) else {
            continue;
        };
        if seen_ids.insert(room.id.clone()) {
            rooms.push(room);
        }
    }

    debug!(rooms = rooms.len(), "room detection finished");
    rooms
}

fn face_to_room(
    graph: &WallGraph<'_>,
    face: &[usize],
    converter: &CoordinateConverter,
    config: &DetectionConfig,
) -> Option<Room> {
    let vertices: Vec<Point2D> = face.iter().map(|&v| graph.positions[v]).collect();

    // Outer faces trace with negative area
    let area = signed_area(&vertices);
    if area <= 0.0 {
        return None;
    }

    let mut corner_set: Vec<&str> = face.iter().map(|&v| graph.ids[v]).collect();
    corner_set.sort_unstable();
    corner_set.dedup();
    if corner_set.len() < 3 {
        return None;
    }

    let area = converter.area_to_sq_ft(area);
    if area < config.min_room_area {
        trace!(area, "face below minimum room area");
        return None;
    }

    // Start the ring at its smallest corner id
    let start = face
        .iter()
        .enumerate()
        .min_by_key(|&(_, &v)| graph.ids[v])
        .map(|(i, _)| i)
        .unwrap_or(0);

    let ring: Vec<usize> = face[start..].iter().chain(&face[..start]).copied().collect();

    Some(Room {
        id: room_id(&corner_set),
        name: String::new(),
        room_type: DEFAULT_ROOM_TYPE.to_string(),
        vertices: ring.iter().map(|&v| graph.positions[v]).collect(),
        corner_ids: ring.iter().map(|&v| graph.ids[v].to_string()).collect(),
        area,
    })
}

/// Stable id from a sorted, deduplicated corner-id set
fn room_id(sorted_corner_ids: &[&str]) -> String {
    let mut hasher = FxHasher::default();
    sorted_corner_ids.hash(&mut hasher);
    format!("room-{:016x}", hasher.finish())
}
