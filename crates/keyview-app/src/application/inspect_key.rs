//! InspectKeyUseCase: details shown for the selected key.
//!
//! Combines the key's physical shape with its binding on the displayed
//! layer.  Only the base layer (0) is displayed today.

use std::fmt;

use keyview_core::{Binding, KeyShape, Keymap};

use super::session::LayoutSession;

/// Layer whose bindings are shown on keycaps and in key details.
pub const DISPLAY_LAYER: usize = 0;

/// Everything known about one key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDetails {
    pub shape: KeyShape,
    pub binding: Option<Binding>,
    pub label: Option<String>,
    /// `(page, id)` split out of the binding's first parameter.
    pub usage: Option<(u8, u16)>,
}

impl KeyDetails {
    pub fn new(shape: KeyShape, keymap: Option<&Keymap>, layer: usize) -> Self {
        let binding = keymap.and_then(|km| km.binding(layer, shape.index)).copied();
        let usage = binding.map(|b| b.usage());
        Self {
            shape,
            binding,
            label: usage.and_then(|u| u.label()),
            usage: usage.map(|u| (u.page, u.id)),
        }
    }
}

impl fmt::Display for KeyDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.shape;
        writeln!(f, "Index: {}", s.index)?;
        writeln!(f, "Position: x={}, y={}, w={}, h={}", s.x, s.y, s.width, s.height)?;
        writeln!(f, "Rotation: r={}", s.rotation_degrees)?;
        write!(f, "Binding: {}", self.label.as_deref().unwrap_or("(none)"))?;
        if let Some((page, id)) = self.usage {
            write!(f, "\nUsage: page={page}, id={id}")?;
        }
        Ok(())
    }
}

/// Details for the session's selected key, or `None` if nothing is selected.
pub fn inspect_selected(session: &LayoutSession, keymap: Option<&Keymap>) -> Option<KeyDetails> {
    let shape = session.selected_key_shape()?;
    Some(KeyDetails::new(*shape, keymap, DISPLAY_LAYER))
}
