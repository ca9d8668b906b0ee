//! Domain entities for Keyview.
//!
//! Everything in here is pure: no I/O, no clocks, no shared state.  Every
//! operation can be re-run on each frame or pointer event without caching,
//! and callers decide when inputs have changed.

/// Geometry primitives: points, rotation, and layout bounds.
pub mod geometry;


/// Key shapes and the ordered layouts that contain them.
///
/// See [`layout::Layout`] for the main type.
pub mod layout;

/// Selected-key state.
pub mod selection;

/// Layout-to-viewport fitting.
pub mod viewport;
