// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Split a wall into solid pieces around its openings.
//!
//! Each opening leaves a hole from `bottom_offset` to its top. The wall
//! around it is covered by full-height pieces between openings, a header
//! above each opening and a sill below each window.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::WallOpening;

/// Which part of the wall a piece covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Full,
    Header,
    Sill,
}

/// A solid wall piece in 1-D wall coordinates (feet)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallSegment {
    /// Distance from the wall start
    pub start_pos: f64,
    pub length: f64,
    pub bottom_height: f64,
    pub top_height: f64,
    pub kind: SegmentKind,
}

impl WallSegment {
    pub fn end_pos(&self) -> f64 {
        self.start_pos + self.length
    }

    pub fn height(&self) -> f64 {
        self.top_height - self.bottom_height
    }

    /// Center along the wall
    pub fn center_pos(&self) -> f64 {
        self.start_pos + self.length / 2.0
    }
}

/// Segment a wall of `length` and `ceiling` height around `openings`, which
/// must be sorted by position. Pieces smaller than `epsilon` in length or
/// height are dropped. Overlapping openings never move the cursor backwards.
pub fn segment_wall(
    length: f64,
    ceiling: f64,
    openings: &[WallOpening],
    epsilon: f64,
) -> Vec<WallSegment> {
    let mut segments = Vec::with_capacity(openings.len() * 3 + 1);
    if !(length > epsilon) || !(ceiling > epsilon) {
        return segments;
    }

    let push = |segments: &mut Vec<WallSegment>,
                start: f64,
                end: f64,
                bottom: f64,
                top: f64,
                kind: SegmentKind| {
        if end - start > epsilon && top - bottom > epsilon {
            segments.push(WallSegment {
                start_pos: start,
                length: end - start,
                bottom_height: bottom,
                top_height: top,
                kind,
            });
        }
    };

    let mut current_pos = 0.0_f64;

    for opening in openings {
        let start = opening.start().clamp(0.0, length);
        let end = opening.end().clamp(0.0, length);
        if end - start <= epsilon {
            trace!(item = %opening.item_id, "opening has no width on this wall");
            continue;
        }

        if start > current_pos + epsilon {
            push(&mut segments, current_pos, start, 0.0, ceiling, SegmentKind::Full);
        }

        let bottom = opening.bottom_offset.clamp(0.0, ceiling);
        let top = opening.top().clamp(bottom, ceiling);
        if ceiling - top > epsilon {
            push(&mut segments, start, end, top, ceiling, SegmentKind::Header);
        }
        if bottom > epsilon {
            push(&mut segments, start, end, 0.0, bottom, SegmentKind::Sill);
        }

        current_pos = current_pos.max(end);
    }

    if current_pos < length - epsilon {
        push(&mut segments, current_pos, length, 0.0, ceiling, SegmentKind::Full);
    }

    segments
}
