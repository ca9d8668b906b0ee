//! Fitting a layout into a pixel viewport.
//!
//! A [`ViewTransform`] maps layout space to viewport space with a uniform
//! scale and an offset: `viewport = layout * scale + offset`.  It is derived
//! data, recomputed by the owning session whenever the layout or the
//! viewport size changes, and never stored with the layout.

use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Point};

/// Padding in pixels kept free on every side of the drawn layout.
pub const DEFAULT_PADDING: f64 = 12.0;

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
}

fn default_padding() -> f64 {
    DEFAULT_PADDING
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: DEFAULT_PADDING,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// Layout-to-viewport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl ViewTransform {
    /// The identity mapping: layout units are pixels.
    pub const IDENTITY: ViewTransform = ViewTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    /// Fits `bounds` into a `viewport_width × viewport_height` area, leaving
    /// `padding` pixels on every side, preserving aspect ratio and centring
    /// the content along the looser axis.
    ///
    /// Content extents are clamped to at least one layout unit so the scale is
    /// always finite.  A viewport smaller than twice the padding yields a zero
    /// or negative scale; that is returned as is rather than as an error, and
    /// [`hit_test`](super::hit_test::hit_test) treats it as drawing nothing.
    pub fn fit(bounds: &Bounds, viewport_width: f64, viewport_height: f64, padding: f64) -> Self {
        let content_width = bounds.width().max(1.0);
        let content_height = bounds.height().max(1.0);
        let available_width = viewport_width - 2.0 * padding;
        let available_height = viewport_height - 2.0 * padding;

        let scale = (available_width / content_width).min(available_height / content_height);

        Self {
            offset_x: padding + (available_width - content_width * scale) / 2.0
                - bounds.min_x * scale,
            offset_y: padding + (available_height - content_height * scale) / 2.0
                - bounds.min_y * scale,
            scale,
        }
    }

    /// Same as [`ViewTransform::fit`] but takes a [`Viewport`].
    pub fn fit_viewport(bounds: &Bounds, viewport: &Viewport) -> Self {
        Self::fit(bounds, viewport.width, viewport.height, viewport.padding)
    }

    /// Maps a layout-space point to viewport pixels.
    pub fn to_viewport(&self, layout_point: Point) -> Point {
        Point {
            x: layout_point.x * self.scale + self.offset_x,
            y: layout_point.y * self.scale + self.offset_y,
        }
    }

    /// Maps a viewport pixel back to layout space.
    ///
    /// With a zero scale the result is non-finite and contains no key.
    pub fn to_layout(&self, viewport_point: Point) -> Point {
        Point {
            x: (viewport_point.x - self.offset_x) / self.scale,
            y: (viewport_point.y - self.offset_y) / self.scale,
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_bounds() -> Bounds {
        Bounds { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 }
    }

    #[test]
    fn test_fit_unit_key_into_square_viewport() {
        let t = ViewTransform::fit(&unit_bounds(), 200.0, 200.0, 12.0);

        assert!((t.scale - 176.0).abs() < EPS);
        assert!((t.offset_x - 12.0).abs() < EPS);
        assert!((t.offset_y - 12.0).abs() < EPS);
    }

    #[test]
    fn test_fit_uses_tighter_axis_and_centres_the_other() {
        // 4×1 content into 200×200 with no padding: width limits scale to 50,
        // the 50px-tall content is centred vertically at offset 75.
        let bounds = Bounds { min_x: 0.0, min_y: 0.0, max_x: 4.0, max_y: 1.0 };
        let t = ViewTransform::fit(&bounds, 200.0, 200.0, 0.0);

        assert!((t.scale - 50.0).abs() < EPS);
        assert!((t.offset_x - 0.0).abs() < EPS);
        assert!((t.offset_y - 75.0).abs() < EPS);
    }

    #[test]
    fn test_fit_compensates_for_negative_minimum() {
        let bounds = Bounds { min_x: -2.0, min_y: -1.0, max_x: 2.0, max_y: 1.0 };
        let t = ViewTransform::fit(&bounds, 400.0, 200.0, 0.0);

        // The layout's top-left corner lands on the viewport's top-left corner.
        let top_left = t.to_viewport(Point::new(-2.0, -1.0));
        assert!(top_left.x.abs() < EPS && top_left.y.abs() < EPS);
    }

    #[test]
    fn test_fit_zero_area_bounds_still_produces_finite_scale() {
        let bounds = Bounds { min_x: 3.0, min_y: 3.0, max_x: 3.0, max_y: 3.0 };
        let t = ViewTransform::fit(&bounds, 100.0, 50.0, 5.0);
        assert!(t.scale.is_finite());
        assert!((t.scale - 40.0).abs() < EPS);
    }

    #[test]
    fn test_fit_is_finite_across_viewport_sizes() {
        let bounds = Bounds { min_x: -0.3, min_y: 1.7, max_x: 14.2, max_y: 5.9 };
        for (w, h) in [(1.0, 1.0), (24.0, 24.0), (320.0, 80.0), (1920.0, 1080.0)] {
            let t = ViewTransform::fit(&bounds, w, h, 12.0);
            assert!(t.scale.is_finite(), "scale not finite for {w}×{h}");
            assert!(t.offset_x.is_finite() && t.offset_y.is_finite());
        }
    }

    #[test]
    fn test_fit_viewport_smaller_than_padding_gives_non_positive_scale() {
        let t = ViewTransform::fit(&unit_bounds(), 10.0, 10.0, 12.0);
        assert!(t.scale <= 0.0);
    }

    #[test]
    fn test_to_layout_inverts_to_viewport() {
        let t = ViewTransform { offset_x: 31.5, offset_y: -8.0, scale: 42.25 };
        for p in [Point::new(0.0, 0.0), Point::new(3.7, -1.2), Point::new(-50.0, 99.0)] {
            let back = t.to_layout(t.to_viewport(p));
            assert!((back.x - p.x).abs() < EPS && (back.y - p.y).abs() < EPS);
        }
    }

    #[test]
    fn test_viewport_deserializes_with_default_padding() {
        let vp: Viewport = serde_json::from_str(r#"{"width": 640, "height": 480}"#).unwrap();
        assert_eq!(vp, Viewport::new(640.0, 480.0));
    }
}
