//! Physical key layout domain entities.
//!
//! A [`Layout`] is an ordered, immutable snapshot of [`KeyShape`]s received
//! from a device.  Position in the list is the key's identity: it is the
//! index used by keymap bindings, by selection, and by hit-testing.  It is
//! also the draw order, so later keys sit on top of earlier ones.
//!
//! Layouts are replaced wholesale when a device reports new data and are
//! never patched in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{compute_bounds, Bounds, Point};

/// Extent substituted for a missing, zero, or otherwise unusable key width/height.
const DEFAULT_KEY_EXTENT: f64 = 1.0;

/// Errors raised when indexing into layouts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The key index does not exist in the layout.
    #[error("key index {index} out of range: layout has {len} keys")]
    KeyIndexOutOfRange { index: usize, len: usize },

    /// The layout index does not exist in the device's layout list.
    #[error("layout index {index} out of range: device reports {count} layouts")]
    LayoutIndexOutOfRange { index: usize, count: usize },
}

/// Physical attributes of one key exactly as a device reports them.
///
/// Every field is optional; [`KeyShape::from_attrs`] substitutes the
/// documented defaults.  Rotation `r` is in degrees, clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Rotation in degrees, clockwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    /// Rotation origin X.  Defaults to the key's horizontal centre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    /// Rotation origin Y.  Defaults to the key's vertical centre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
}

/// One physical key on a layout, with all defaults resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyShape {
    /// Position within the owning layout.
    pub index: usize,
    /// Left edge of the unrotated key, in layout units.
    pub x: f64,
    /// Top edge of the unrotated key, in layout units.
    pub y: f64,
    /// Width in layout units (always > 0).
    pub width: f64,
    /// Height in layout units (always > 0).
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation_degrees: f64,
    /// Pivot the rotation is applied around.
    pub rotation_origin: Point,
}

impl KeyShape {
    /// Creates an unrotated key whose rotation origin is its own centre.
    pub fn new(index: usize, x: f64, y: f64, width: f64, height: f64) -> Self {
        let width = resolve_extent(Some(width));
        let height = resolve_extent(Some(height));
        Self {
            index,
            x,
            y,
            width,
            height,
            rotation_degrees: 0.0,
            rotation_origin: Point::new(x + width / 2.0, y + height / 2.0),
        }
    }

    /// Resolves device-reported attributes into a key shape.
    pub fn from_attrs(index: usize, attrs: &KeyAttrs) -> Self {
        let x = attrs.x.unwrap_or(0.0);
        let y = attrs.y.unwrap_or(0.0);
        let width = resolve_extent(attrs.width);
        let height = resolve_extent(attrs.height);
        Self {
            index,
            x,
            y,
            width,
            height,
            rotation_degrees: attrs.r.unwrap_or(0.0),
            rotation_origin: Point::new(
                attrs.rx.unwrap_or(x + width / 2.0),
                attrs.ry.unwrap_or(y + height / 2.0),
            ),
        }
    }

    /// Sets the clockwise rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Sets an explicit rotation origin.
    #[must_use]
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.rotation_origin = Point::new(x, y);
        self
    }

    /// Rotation converted to radians.
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }

    /// Returns `true` if the key is drawn rotated.
    pub fn is_rotated(&self) -> bool {
        self.rotation_degrees != 0.0
    }

    /// Centre of the unrotated key rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

fn resolve_extent(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_KEY_EXTENT,
    }
}

/// Serialized form of a [`Layout`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutAttrs {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keys: Vec<KeyAttrs>,
}

/// An ordered physical layout.  Insertion order = draw order = z-order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LayoutAttrs")]
pub struct Layout {
    name: String,
    keys: Vec<KeyShape>,
}

impl Layout {
    /// Builds a layout from already-resolved shapes, re-indexing them by position.
    pub fn new(name: impl Into<String>, keys: Vec<KeyShape>) -> Self {
        let keys = keys
            .into_iter()
            .enumerate()
            .map(|(index, key)| KeyShape { index, ..key })
            .collect();
        Self {
            name: name.into(),
            keys,
        }
    }

    /// Builds a layout from device-reported key attributes.
    pub fn from_attrs(name: impl Into<String>, attrs: &[KeyAttrs]) -> Self {
        Self {
            name: name.into(),
            keys: attrs
                .iter()
                .enumerate()
                .map(|(index, a)| KeyShape::from_attrs(index, a))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All keys in draw order.
    pub fn keys(&self) -> &[KeyShape] {
        &self.keys
    }

    /// Looks up a key by index.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyIndexOutOfRange`] if `index` is past the end.
    pub fn key(&self, index: usize) -> Result<&KeyShape, LayoutError> {
        self.keys.get(index).ok_or(LayoutError::KeyIndexOutOfRange {
            index,
            len: self.keys.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Axis-aligned bounding box of every rotated key.
    pub fn bounds(&self) -> Bounds {
        compute_bounds(&self.keys)
    }
}

impl From<LayoutAttrs> for Layout {
    fn from(attrs: LayoutAttrs) -> Self {
        Layout::from_attrs(attrs.name, &attrs.keys)
    }
}

/// The full set of physical layouts a device reports, plus which one it has active.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLayouts {
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub active_layout_index: usize,
}

impl PhysicalLayouts {
    /// Looks up a layout by index.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::LayoutIndexOutOfRange`] if `index` is past the end.
    pub fn get(&self, index: usize) -> Result<&Layout, LayoutError> {
        self.layouts
            .get(index)
            .ok_or(LayoutError::LayoutIndexOutOfRange {
                index,
                count: self.layouts.len(),
            })
    }

    /// The device's active layout, if it reports any.
    ///
    /// An out-of-range active index falls back to the first layout.
    pub fn active(&self) -> Option<&Layout> {
        self.layouts
            .get(self.active_layout_index)
            .or_else(|| self.layouts.first())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
