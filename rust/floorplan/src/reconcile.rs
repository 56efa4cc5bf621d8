// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Carry room metadata across re-detection.
//!
//! Detection produces fresh rooms every time. Each new room is matched to a
//! previous one by shared boundary vertices (greedy, best overlap first);
//! rooms left over fall back to the nearest previous centroid within a small
//! radius. A match inherits the previous `id`, `name` and `room_type`.
//! Unmatched rooms get the first free `Room N` name.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::config::DetectionConfig;
use crate::coords::{centroid, CoordinateConverter};
use crate::types::{Point3D, Room};

/// Vertex keys are editor coordinates rounded to this many steps per unit
const VERTEX_KEY_PRECISION: f64 = 100.0;

fn vertex_keys(room: &Room) -> FxHashSet<(i64, i64)> {
    room.vertices
        .iter()
        .map(|p| {
            (
                (p.x * VERTEX_KEY_PRECISION).round() as i64,
                (p.y * VERTEX_KEY_PRECISION).round() as i64,
            )
        })
        .collect()
}

fn vertex_overlap(a: &FxHashSet<(i64, i64)>, b: &FxHashSet<(i64, i64)>) -> f64 {
    let denominator = a.len().max(b.len());
    if denominator == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / denominator as f64
}

/// Merge freshly detected rooms with the previous set.
pub fn reconcile_rooms(
    previous: &[Room],
    detected: Vec<Room>,
    converter: &CoordinateConverter,
    config: &DetectionConfig,
) -> Vec<Room> {
    let old_keys: Vec<_> = previous.iter().map(vertex_keys).collect();
    let new_keys: Vec<_> = detected.iter().map(vertex_keys).collect();

    let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
    for (n, nk) in new_keys.iter().enumerate() {
        for (o, ok) in old_keys.iter().enumerate() {
            let score = vertex_overlap(nk, ok);
            if score >= config.min_vertex_overlap && score > 0.0 {
                candidates.push((score, n, o));
            }
        }
    }
    // Best overlap first; index order breaks ties
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut matched_new: Vec<Option<usize>> = vec![None; detected.len()];
    let mut used_old = vec![false; previous.len()];
    for (score, n, o) in candidates {
        if matched_new[n].is_none() && !used_old[o] {
            trace!(room = %previous[o].id, score, "matched by vertex overlap");
            matched_new[n] = Some(o);
            used_old[o] = true;
        }
    }

    let centroid_of = |room: &Room| -> Point3D { centroid(&converter.polygon_to_scene(&room.vertices)) };
    let old_centroids: Vec<Point3D> = previous.iter().map(centroid_of).collect();

    for (n, room) in detected.iter().enumerate() {
        if matched_new[n].is_some() {
            continue;
        }
        let c = centroid_of(room);
        let nearest = old_centroids
            .iter()
            .enumerate()
            .filter(|&(o, _)| !used_old[o])
            .map(|(o, oc)| (o, c.distance_xz(oc)))
            .filter(|&(_, d)| d <= config.centroid_match_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((o, distance)) = nearest {
            trace!(room = %previous[o].id, distance, "matched by centroid");
            matched_new[n] = Some(o);
            used_old[o] = true;
        }
    }

    let mut taken_ids: FxHashSet<String> = FxHashSet::default();
    let mut taken_names: FxHashSet<String> = FxHashSet::default();
    for o in matched_new.iter().flatten() {
        taken_ids.insert(previous[*o].id.clone());
        taken_names.insert(previous[*o].name.clone());
    }

    let mut merged = Vec::with_capacity(detected.len());
    let mut next_number = 1usize;

    for (mut room, matched) in detected.into_iter().zip(matched_new) {
        match matched {
            Some(o) => {
                let old = &previous[o];
                room.id = old.id.clone();
                room.name = old.name.clone();
                room.room_type = old.room_type.clone();
            }
            None => {
                if taken_ids.contains(&room.id) {
                    let base = room.id.clone();
                    let mut suffix = 2;
                    while taken_ids.contains(&room.id) {
                        room.id = format!("{base}-{suffix}");
                        suffix += 1;
                    }
                }
                taken_ids.insert(room.id.clone());

                if room.name.is_empty() {
                    while taken_names.contains(&format!("Room {next_number}")) {
                        next_number += 1;
                    }
                    room.name = format!("Room {next_number}");
                    taken_names.insert(room.name.clone());
                }
            }
        }
        merged.push(room);
    }

    merged
}
