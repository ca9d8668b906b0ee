//! Keymap decoding.
//!
//! Devices report each key's binding as an opaque behaviour ID plus two
//! numeric parameters.  For key-press style behaviours the first parameter
//! packs a USB HID usage (page + ID) together with implicit modifiers; this
//! module unpacks it and produces the short labels shown on keycaps.

pub mod binding;
pub mod hid;
pub mod usage;

pub use binding::{Binding, Keymap, Layer};
pub use hid::HidKeyCode;
pub use usage::{split_usage, usage_label, ImplicitModifiers, Usage};
