//! # keyview-core
//!
//! Shared library for Keyview containing the physical key layout model,
//! layout geometry (rotation, bounds, fit-to-viewport), hit-testing, and the
//! keymap binding decoder.
//!
//! It has zero dependencies on OS APIs, UI frameworks, or device transports.
//! Layouts and keymaps arrive here already decoded; this crate only computes.
//!
//! # Architecture overview
//!
//! A keyboard reports one or more *physical layouts*: ordered lists of key
//! rectangles measured in layout units, each optionally rotated about a
//! pivot.  To display a layout and let a user click on a key, three pure
//! computations run in sequence:
//!
//! - **`domain::geometry`** – rotates key corners and derives the
//!   axis-aligned bounding box of the whole layout.
//!
//! - **`domain::viewport`** – fits that box into a pixel viewport with
//!   padding, producing a uniform scale and centring offset.
//!
//! - **`domain::hit_test`** – maps a pointer position back into layout space
//!   and finds the topmost key under it.
//!
//! The **`keymap`** module decodes the opaque binding parameters a device
//! reports per key into USB HID usages and human-readable labels.

pub mod domain;
pub mod keymap;

pub use domain::geometry::{compute_bounds, rotate, Bounds, Point};
pub use domain::hit_test::{hit_test, hit_test_layout_point};
pub use domain::layout::{KeyAttrs, KeyShape, Layout, LayoutError, PhysicalLayouts};
pub use domain::selection::SelectionState;
pub use domain::viewport::{ViewTransform, Viewport};
pub use keymap::binding::{Binding, Keymap, Layer};
pub use keymap::hid::HidKeyCode;
