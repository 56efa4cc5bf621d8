// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editor ↔ scene coordinate conversion.
//!
//! Editor space is the 2D canvas: pixels, y down. Scene space is feet with
//! y up; the canvas center maps to the scene origin and `z = -(y_editor)`
//! after centering.
//!
//! Angles: editor rotations are degrees, 0 pointing right and increasing
//! clockwise on screen. [`rotation_to_scene`] turns them into a heading in the
//! scene XZ plane measured as `atan2(z, x)`, the same convention as
//! [`crate::types::WallEdge::angle`]. A primitive aligned with heading `h`
//! is rotated by `-h` about +Y.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Point2D, Point3D};

/// Editor canvas scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinateConfig {
    pub pixels_per_foot: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self {
            pixels_per_foot: 20.0,
            canvas_width: 1200.0,
            canvas_height: 800.0,
        }
    }
}

/// Axis-aligned box over scene points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Point3D,
    pub max: Point3D,
}

impl BoundingBox {
    pub fn size(&self) -> Point3D {
        Point3D::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    pub fn center(&self) -> Point3D {
        Point3D::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

/// Converts between editor and scene space for one canvas configuration
#[derive(Debug, Clone, Copy)]
pub struct CoordinateConverter {
    pixels_per_foot: f64,
    center_x: f64,
    center_y: f64,
}

impl CoordinateConverter {
    pub fn new(config: &CoordinateConfig) -> Self {
        let pixels_per_foot = if config.pixels_per_foot.is_finite() && config.pixels_per_foot > 0.0
        {
            config.pixels_per_foot
        } else {
            debug!(
                pixels_per_foot = config.pixels_per_foot,
                "invalid canvas scale, using 1 unit per foot"
            );
            1.0
        };

        Self {
            pixels_per_foot,
            center_x: config.canvas_width / pixels_per_foot / 2.0,
            center_y: config.canvas_height / pixels_per_foot / 2.0,
        }
    }

    pub fn pixels_per_foot(&self) -> f64 {
        self.pixels_per_foot
    }

    /// Editor point to scene point at the given height (feet)
    #[inline]
    pub fn to_scene(&self, p: Point2D, height: f64) -> Point3D {
        let feet_x = self.length_to_feet(p.x);
        let feet_y = self.length_to_feet(p.y);
        Point3D::new(feet_x - self.center_x, height, -(feet_y - self.center_y))
    }

    /// Scene point back to editor space; height is discarded
    #[inline]
    pub fn to_editor(&self, p: Point3D) -> Point2D {
        Point2D::new(
            (p.x + self.center_x) * self.pixels_per_foot,
            (self.center_y - p.z) * self.pixels_per_foot,
        )
    }

    pub fn polygon_to_scene(&self, vertices: &[Point2D]) -> Vec<Point3D> {
        vertices.iter().map(|v| self.to_scene(*v, 0.0)).collect()
    }

    /// Editor length to feet
    #[inline]
    pub fn length_to_feet(&self, editor_length: f64) -> f64 {
        editor_length / self.pixels_per_foot
    }

    /// Editor area to square feet
    #[inline]
    pub fn area_to_sq_ft(&self, editor_area: f64) -> f64 {
        editor_area / (self.pixels_per_foot * self.pixels_per_foot)
    }
}

/// Bounding box of scene points; all zeros for an empty set
pub fn bounding_box(points: &[Point3D]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };

    points.iter().skip(1).fold(
        BoundingBox {
            min: *first,
            max: *first,
        },
        |bb, p| BoundingBox {
            min: Point3D::new(bb.min.x.min(p.x), bb.min.y.min(p.y), bb.min.z.min(p.z)),
            max: Point3D::new(bb.max.x.max(p.x), bb.max.y.max(p.y), bb.max.z.max(p.z)),
        },
    )
}

/// Vertex average of scene points; the origin for an empty set
pub fn centroid(points: &[Point3D]) -> Point3D {
    if points.is_empty() {
        return Point3D::default();
    }

    let n = points.len() as f64;
    let (x, y, z) = points
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
    Point3D::new(x / n, y / n, z / n)
}

/// Editor degrees (clockwise on screen) to a scene XZ heading in radians
#[inline]
pub fn rotation_to_scene(degrees: f64) -> f64 {
    -degrees.to_radians()
}

/// Fold an angle difference into `[0, π/2]`, ignoring direction
pub fn undirected_angle_between(a: f64, b: f64) -> f64 {
    use std::f64::consts::PI;
    let d = (a - b).rem_euclid(PI);
    d.min(PI - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn converter() -> CoordinateConverter {
        CoordinateConverter::new(&CoordinateConfig {
            pixels_per_foot: 20.0,
            canvas_width: 800.0,
            canvas_height: 600.0,
        })
    }

    #[test]
    fn test_canvas_center_maps_to_origin() {
        let c = converter();
        let p = c.to_scene(Point2D::new(400.0, 300.0), 0.0);
        assert_abs_diff_eq!(p.x, 0.0);
        assert_abs_diff_eq!(p.z, 0.0);
    }

    #[test]
    fn test_forward_transform() {
        let c = converter();
        // 100 px right and 40 px below center = 5 ft right, 2 ft toward -z
        let p = c.to_scene(Point2D::new(500.0, 340.0), 3.0);
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let c = converter();
        let samples = [
            Point2D::new(0.0, 0.0),
            Point2D::new(123.456, 789.012),
            Point2D::new(-50.5, 1e5),
            Point2D::new(3.3e-3, -7.0),
        ];
        for p in samples {
            let back = c.to_editor(c.to_scene(p, 4.2));
            // 1e-6 ft tolerance expressed in pixels
            assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-6 * 20.0);
            assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-6 * 20.0);
        }
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        let c = CoordinateConverter::new(&CoordinateConfig {
            pixels_per_foot: 0.0,
            canvas_width: 10.0,
            canvas_height: 10.0,
        });
        assert_eq!(c.pixels_per_foot(), 1.0);
        let p = c.to_scene(Point2D::new(5.0, 5.0), 0.0);
        assert_abs_diff_eq!(p.x, 0.0);
    }

    #[test]
    fn test_polygon_and_area_conversion() {
        let c = converter();
        let ring = c.polygon_to_scene(&[Point2D::new(400.0, 300.0), Point2D::new(420.0, 300.0)]);
        assert_eq!(ring.len(), 2);
        assert_abs_diff_eq!(ring[0].distance_xz(&ring[1]), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.area_to_sq_ft(400.0 * 300.0), 300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.length_to_feet(60.0), 3.0);
    }

    #[test]
    fn test_bounding_box_and_centroid() {
        let points = [
            Point3D::new(-1.0, 0.0, 2.0),
            Point3D::new(3.0, 1.0, -2.0),
            Point3D::new(1.0, 2.0, 0.0),
        ];
        let bb = bounding_box(&points);
        assert_eq!(bb.min, Point3D::new(-1.0, 0.0, -2.0));
        assert_eq!(bb.max, Point3D::new(3.0, 2.0, 2.0));
        assert_eq!(bb.size(), Point3D::new(4.0, 2.0, 4.0));
        assert_eq!(bb.center(), Point3D::new(1.0, 1.0, 0.0));
        assert_eq!(centroid(&points), Point3D::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_sets_default() {
        assert_eq!(bounding_box(&[]), BoundingBox::default());
        assert_eq!(centroid(&[]), Point3D::default());
    }

    #[test]
    fn test_rotation_conversion() {
        assert_abs_diff_eq!(rotation_to_scene(0.0), 0.0);
        assert_abs_diff_eq!(rotation_to_scene(90.0), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(rotation_to_scene(-180.0), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_editor_heading_matches_scene_direction() {
        // An editor direction rotated 90 degrees clockwise points down the
        // canvas; in the scene that is -z, heading -π/2.
        let c = converter();
        let a = c.to_scene(Point2D::new(400.0, 300.0), 0.0);
        let b = c.to_scene(Point2D::new(400.0, 320.0), 0.0);
        let heading = (b.z - a.z).atan2(b.x - a.x);
        assert_abs_diff_eq!(heading, rotation_to_scene(90.0), epsilon = 1e-12);
    }

    #[test]
    fn test_undirected_angle_between() {
        assert_abs_diff_eq!(undirected_angle_between(0.0, PI), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(undirected_angle_between(0.1, -0.1), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(undirected_angle_between(FRAC_PI_2, 0.0), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(undirected_angle_between(3.0 * PI / 4.0, 0.0), PI / 4.0, epsilon = 1e-12);
    }
}
