// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D profiles swept into wall boxes, furniture parts and posts

use crate::error::{Error, Result};
use crate::triangulation::triangulate_polygon;
use nalgebra::Point2;

/// Closed 2D profile (counter-clockwise outer boundary)
#[derive(Debug, Clone)]
pub struct Profile2D {
    pub outer: Vec<Point2<f64>>,
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    pub points: Vec<Point2<f64>>,
    /// Triangle indices into `points`
    pub indices: Vec<usize>,
}

impl Profile2D {
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self { outer }
    }

    /// Triangulate the profile for cap generation
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }

        let indices = triangulate_polygon(&self.outer)?;
        Ok(Triangulation {
            points: self.outer.clone(),
            indices,
        })
    }
}

/// Create a rectangular profile centered on the origin
#[inline]
pub fn create_rectangle(width: f64, height: f64) -> Profile2D {
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    Profile2D::new(vec![
        Point2::new(-half_w, -half_h),
        Point2::new(half_w, -half_h),
        Point2::new(half_w, half_h),
        Point2::new(-half_w, half_h),
    ])
}

/// Create a circular profile centered on the origin
pub fn create_circle(radius: f64) -> Profile2D {
    let segments = calculate_circle_segments(radius);

    let outer = (0..segments)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();

    Profile2D::new(outer)
}

/// Adaptive segment count for a circle of the given radius (feet).
/// Furniture parts are small, so the range is kept tight.
#[inline]
pub fn calculate_circle_segments(radius: f64) -> usize {
    let segments = (radius.max(0.0).sqrt() * 12.0).ceil() as usize;
    segments.clamp(12, 32)
}
