//! Geometry primitives for physical key layouts.
//!
//! Layout space uses screen conventions: X grows to the right, Y grows
//! downward, and a positive rotation angle turns clockwise.

use serde::{Deserialize, Serialize};

use super::layout::KeyShape;

/// A point in layout or viewport space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rotates `point` about `origin` by `angle_radians` (clockwise on screen).
///
/// Passing the negated angle undoes the rotation, which is how hit-testing
/// brings a pointer back into a key's unrotated frame.
pub fn rotate(point: Point, origin: Point, angle_radians: f64) -> Point {
    let (sin, cos) = angle_radians.sin_cos();
    let dx = point.x - origin.x;
    let dy = point.y - origin.y;
    Point {
        x: origin.x + dx * cos - dy * sin,
        y: origin.y + dx * sin + dy * cos,
    }
}

impl KeyShape {
    /// The four corners of the key after rotation, in the order
    /// top-left, top-right, bottom-right, bottom-left of the unrotated rectangle.
    pub fn corners(&self) -> [Point; 4] {
        let rad = self.rotation_radians();
        let origin = self.rotation_origin;
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        [
            Point::new(self.x, self.y),
            Point::new(right, self.y),
            Point::new(right, bottom),
            Point::new(self.x, bottom),
        ]
        .map(|corner| rotate(corner, origin, rad))
    }
}

/// Axis-aligned bounding box in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Substituted whenever the real extents cannot be computed.
    pub const FALLBACK: Bounds = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 1.0,
        max_y: 1.0,
    };

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Computes the bounding box of every rotated corner of every key.
///
/// Returns [`Bounds::FALLBACK`] for an empty layout or when any extent comes
/// out non-finite, so downstream scaling never sees `NaN` or infinities.
pub fn compute_bounds(keys: &[KeyShape]) -> Bounds {
    let mut bounds = Bounds {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    for corner in keys.iter().flat_map(KeyShape::corners) {
        if corner.x < bounds.min_x {
            bounds.min_x = corner.x;
        }
        if corner.y < bounds.min_y {
            bounds.min_y = corner.y;
        }
        if corner.x > bounds.max_x {
            bounds.max_x = corner.x;
        }
        if corner.y > bounds.max_y {
            bounds.max_y = corner.y;
        }
    }

    if bounds.is_finite() {
        bounds
    } else {
        tracing::debug!(keys = keys.len(), "layout bounds not finite, using fallback box");
        Bounds::FALLBACK
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_point_near(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn assert_bounds_near(actual: Bounds, expected: Bounds) {
        for (a, e) in [
            (actual.min_x, expected.min_x),
            (actual.min_y, expected.min_y),
            (actual.max_x, expected.max_x),
            (actual.max_y, expected.max_y),
        ] {
            assert!((a - e).abs() < EPS, "expected {expected:?}, got {actual:?}");
        }
    }

    // ── rotate ────────────────────────────────────────────────────────────────

    #[test]
    fn test_rotate_by_zero_returns_same_point() {
        let p = Point::new(3.5, -2.0);
        assert_point_near(rotate(p, Point::new(10.0, 10.0), 0.0), p);
    }

    #[test]
    fn test_rotate_quarter_turn_is_clockwise_with_y_down() {
        // (1, 0) about the origin by +90° lands on (0, 1): right → down.
        let rotated = rotate(Point::new(1.0, 0.0), Point::default(), std::f64::consts::FRAC_PI_2);
        assert_point_near(rotated, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rotate_about_offset_origin() {
        let rotated = rotate(Point::new(2.0, 1.0), Point::new(1.0, 1.0), std::f64::consts::PI);
        assert_point_near(rotated, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rotate_then_inverse_returns_original_point() {
        let origin = Point::new(4.25, -1.5);
        let p = Point::new(7.0, 3.0);
        for deg in [-270.0_f64, -45.0, 12.5, 90.0, 181.0] {
            let rad = deg.to_radians();
            assert_point_near(rotate(rotate(p, origin, rad), origin, -rad), p);
        }
    }

    // ── corners ───────────────────────────────────────────────────────────────

    #[test]
    fn test_corners_of_unrotated_key_are_rectangle_corners() {
        let key = KeyShape::new(0, 1.0, 2.0, 2.0, 1.0);
        let corners = key.corners();
        assert_point_near(corners[0], Point::new(1.0, 2.0));
        assert_point_near(corners[1], Point::new(3.0, 2.0));
        assert_point_near(corners[2], Point::new(3.0, 3.0));
        assert_point_near(corners[3], Point::new(1.0, 3.0));
    }

    // ── compute_bounds ────────────────────────────────────────────────────────

    #[test]
    fn test_compute_bounds_of_empty_layout_is_fallback() {
        assert_eq!(compute_bounds(&[]), Bounds::FALLBACK);
    }

    #[test]
    fn test_compute_bounds_of_single_unrotated_key() {
        let key = KeyShape::new(0, 0.0, 0.0, 2.0, 3.0);
        assert_bounds_near(
            compute_bounds(&[key]),
            Bounds { min_x: 0.0, min_y: 0.0, max_x: 2.0, max_y: 3.0 },
        );
    }

    #[test]
    fn test_compute_bounds_quarter_turn_swaps_width_and_height() {
        let key = KeyShape::new(0, 0.0, 0.0, 2.0, 3.0).with_rotation(90.0);
        let bounds = compute_bounds(&[key]);

        assert!((bounds.width() - 3.0).abs() < EPS);
        assert!((bounds.height() - 2.0).abs() < EPS);
        // Rotation about the centre keeps the centre fixed.
        assert!(((bounds.min_x + bounds.max_x) / 2.0 - 1.0).abs() < EPS);
        assert!(((bounds.min_y + bounds.max_y) / 2.0 - 1.5).abs() < EPS);
    }

    #[test]
    fn test_compute_bounds_spans_multiple_keys() {
        let keys = [
            KeyShape::new(0, -1.0, 0.0, 1.0, 1.0),
            KeyShape::new(1, 4.0, 2.0, 1.5, 1.0),
        ];
        assert_bounds_near(
            compute_bounds(&keys),
            Bounds { min_x: -1.0, min_y: 0.0, max_x: 5.5, max_y: 3.0 },
        );
    }

    #[test]
    fn test_compute_bounds_rotated_about_external_origin() {
        // Unit key at (1,0) turned 180° about (0,0) ends up at (-2..-1, -1..0).
        let key = KeyShape::new(0, 1.0, 0.0, 1.0, 1.0)
            .with_rotation(180.0)
            .with_origin(0.0, 0.0);
        assert_bounds_near(
            compute_bounds(&[key]),
            Bounds { min_x: -2.0, min_y: -1.0, max_x: -1.0, max_y: 0.0 },
        );
    }

    #[test]
    fn test_compute_bounds_with_non_finite_coordinates_is_fallback() {
        let key = KeyShape::new(0, f64::INFINITY, 0.0, 1.0, 1.0);
        assert_eq!(compute_bounds(&[key]), Bounds::FALLBACK);
    }
}
