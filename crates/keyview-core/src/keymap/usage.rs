//! Packed HID usage values.
//!
//! A key-press binding parameter is a 32-bit value laid out as:
//!
//! ```text
//!  31      24 23      16 15                0
//! +----------+----------+-------------------+
//! | implicit |  usage   |     usage ID      |
//! | mods     |  page    |                   |
//! +----------+----------+-------------------+
//! ```
//!
//! Implicit modifiers are what turn e.g. `1` into `!` (Shift+1) on a single key.

use std::fmt;

use super::hid::HidKeyCode;

pub const KEYBOARD_PAGE: u8 = 0x07;
pub const CONSUMER_PAGE: u8 = 0x0C;

/// Consumer page (0x0C) usages commonly bound on keyboards.
const CONSUMER_LABELS: &[(u16, &str)] = &[
    (0x006F, "Bright+"),
    (0x0070, "Bright-"),
    (0x00B5, "Next"),
    (0x00B6, "Prev"),
    (0x00B7, "Stop"),
    (0x00B8, "Eject"),
    (0x00CD, "Play/Pause"),
    (0x00E2, "Mute"),
    (0x00E9, "Vol+"),
    (0x00EA, "Vol-"),
    (0x0192, "Calc"),
    (0x0194, "Files"),
    (0x0223, "WWW Home"),
    (0x0224, "Back"),
    (0x0225, "Forward"),
];

/// Splits a packed usage into `(page, id)`, discarding implicit modifiers.
pub fn split_usage(raw: u32) -> (u8, u16) {
    (((raw >> 16) & 0xFF) as u8, (raw & 0xFFFF) as u16)
}

/// Short label for a usage, if the page and ID are known.
pub fn usage_label(page: u8, id: u16) -> Option<&'static str> {
    match page {
        KEYBOARD_PAGE => HidKeyCode::from_u16(id).label(),
        CONSUMER_PAGE => CONSUMER_LABELS
            .iter()
            .find(|(usage, _)| *usage == id)
            .map(|(_, label)| *label),
        _ => None,
    }
}

/// Modifier bits carried in the top byte of a packed usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ImplicitModifiers(u8);

impl ImplicitModifiers {
    pub const LEFT_CTRL: u8 = 0x01;
    pub const LEFT_SHIFT: u8 = 0x02;
    pub const LEFT_ALT: u8 = 0x04;
    pub const LEFT_GUI: u8 = 0x08;
    pub const RIGHT_CTRL: u8 = 0x10;
    pub const RIGHT_SHIFT: u8 = 0x20;
    pub const RIGHT_ALT: u8 = 0x40;
    pub const RIGHT_GUI: u8 = 0x80;

    const NAMES: [(u8, &'static str); 8] = [
        (Self::LEFT_CTRL, "Ctrl"),
        (Self::LEFT_SHIFT, "Shift"),
        (Self::LEFT_ALT, "Alt"),
        (Self::LEFT_GUI, "Gui"),
        (Self::RIGHT_CTRL, "RCtrl"),
        (Self::RIGHT_SHIFT, "RShift"),
        (Self::RIGHT_ALT, "RAlt"),
        (Self::RIGHT_GUI, "RGui"),
    ];

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit == bit
    }
}

impl fmt::Display for ImplicitModifiers {
    /// Writes the modifiers joined with `+`, e.g. `Ctrl+Shift`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (bit, name) in Self::NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A fully decoded packed usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub page: u8,
    pub id: u16,
    pub modifiers: ImplicitModifiers,
}

impl Usage {
    pub fn decode(raw: u32) -> Self {
        let (page, id) = split_usage(raw);
        Self {
            page,
            id,
            modifiers: ImplicitModifiers::from_bits((raw >> 24) as u8),
        }
    }

    /// Keycap label including implicit modifiers, e.g. `Ctrl+C`.
    ///
    /// Returns `None` when the page/ID pair has no known label.
    pub fn label(&self) -> Option<String> {
        let base = usage_label(self.page, self.id)?;
        if self.modifiers.is_empty() {
            Some(base.to_string())
        } else {
            Some(format!("{}+{base}", self.modifiers))
        }
    }
}
