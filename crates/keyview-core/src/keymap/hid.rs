//! USB HID Usage IDs on the Keyboard/Keypad page (0x07).
//!
//! The official names on this page all start with "Keyboard " ("Keyboard a
//! and A", "Keyboard Return (ENTER)", ...).  Keycaps have no room for that,
//! so every entry here carries the short label the display uses instead.
//!
//! IDs missing from [`KEYBOARD_USAGES`] decode to [`HidKeyCode::Unknown`],
//! which has no label, and the key is drawn blank.

use serde::{Deserialize, Serialize};

/// A key on the keyboard page; the discriminant is its usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum HidKeyCode {
    // a..z
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // 1..0 on the top row
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control and punctuation (HID 0x28–0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    NonUsHash = 0x32,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    CapsLock = 0x39,

    // F1..F12
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // PrintScreen..Up
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Keypad
    NumLock = 0x53,
    NumpadDivide = 0x54,
    NumpadMultiply = 0x55,
    NumpadSubtract = 0x56,
    NumpadAdd = 0x57,
    NumpadEnter = 0x58,
    Numpad1 = 0x59,
    Numpad2 = 0x5A,
    Numpad3 = 0x5B,
    Numpad4 = 0x5C,
    Numpad5 = 0x5D,
    Numpad6 = 0x5E,
    Numpad7 = 0x5F,
    Numpad8 = 0x60,
    Numpad9 = 0x61,
    Numpad0 = 0x62,
    NumpadDecimal = 0x63,

    NonUsBackslash = 0x64,
    ContextMenu = 0x65,

    // Modifiers
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
    ControlRight = 0xE4,
    ShiftRight = 0xE5,
    AltRight = 0xE6,
    MetaRight = 0xE7,

    /// Sentinel for usage IDs with no entry on this page.
    Unknown = 0x0000,
}

/// Every known keyboard-page usage with its keycap label.
pub const KEYBOARD_USAGES: &[(HidKeyCode, &str)] = &[
    (HidKeyCode::KeyA, "A"),
    (HidKeyCode::KeyB, "B"),
    (HidKeyCode::KeyC, "C"),
    (HidKeyCode::KeyD, "D"),
    (HidKeyCode::KeyE, "E"),
    (HidKeyCode::KeyF, "F"),
    (HidKeyCode::KeyG, "G"),
    (HidKeyCode::KeyH, "H"),
    (HidKeyCode::KeyI, "I"),
    (HidKeyCode::KeyJ, "J"),
    (HidKeyCode::KeyK, "K"),
    (HidKeyCode::KeyL, "L"),
    (HidKeyCode::KeyM, "M"),
    (HidKeyCode::KeyN, "N"),
    (HidKeyCode::KeyO, "O"),
    (HidKeyCode::KeyP, "P"),
    (HidKeyCode::KeyQ, "Q"),
    (HidKeyCode::KeyR, "R"),
    (HidKeyCode::KeyS, "S"),
    (HidKeyCode::KeyT, "T"),
    (HidKeyCode::KeyU, "U"),
    (HidKeyCode::KeyV, "V"),
    (HidKeyCode::KeyW, "W"),
    (HidKeyCode::KeyX, "X"),
    (HidKeyCode::KeyY, "Y"),
    (HidKeyCode::KeyZ, "Z"),
    (HidKeyCode::Digit1, "1"),
    (HidKeyCode::Digit2, "2"),
    (HidKeyCode::Digit3, "3"),
    (HidKeyCode::Digit4, "4"),
    (HidKeyCode::Digit5, "5"),
    (HidKeyCode::Digit6, "6"),
    (HidKeyCode::Digit7, "7"),
    (HidKeyCode::Digit8, "8"),
    (HidKeyCode::Digit9, "9"),
    (HidKeyCode::Digit0, "0"),
    (HidKeyCode::Enter, "Enter"),
    (HidKeyCode::Escape, "Esc"),
    (HidKeyCode::Backspace, "Bksp"),
    (HidKeyCode::Tab, "Tab"),
    (HidKeyCode::Space, "Space"),
    (HidKeyCode::Minus, "-"),
    (HidKeyCode::Equal, "="),
    (HidKeyCode::BracketLeft, "["),
    (HidKeyCode::BracketRight, "]"),
    (HidKeyCode::Backslash, "\\"),
    (HidKeyCode::NonUsHash, "#"),
    (HidKeyCode::Semicolon, ";"),
    (HidKeyCode::Quote, "'"),
    (HidKeyCode::Backquote, "`"),
    (HidKeyCode::Comma, ","),
    (HidKeyCode::Period, "."),
    (HidKeyCode::Slash, "/"),
    (HidKeyCode::CapsLock, "Caps"),
    (HidKeyCode::F1, "F1"),
    (HidKeyCode::F2, "F2"),
    (HidKeyCode::F3, "F3"),
    (HidKeyCode::F4, "F4"),
    (HidKeyCode::F5, "F5"),
    (HidKeyCode::F6, "F6"),
    (HidKeyCode::F7, "F7"),
    (HidKeyCode::F8, "F8"),
    (HidKeyCode::F9, "F9"),
    (HidKeyCode::F10, "F10"),
    (HidKeyCode::F11, "F11"),
    (HidKeyCode::F12, "F12"),
    (HidKeyCode::PrintScreen, "PrtSc"),
    (HidKeyCode::ScrollLock, "ScrLk"),
    (HidKeyCode::Pause, "Pause"),
    (HidKeyCode::Insert, "Ins"),
    (HidKeyCode::Home, "Home"),
    (HidKeyCode::PageUp, "PgUp"),
    (HidKeyCode::Delete, "Del"),
    (HidKeyCode::End, "End"),
    (HidKeyCode::PageDown, "PgDn"),
    (HidKeyCode::ArrowRight, "Right"),
    (HidKeyCode::ArrowLeft, "Left"),
    (HidKeyCode::ArrowDown, "Down"),
    (HidKeyCode::ArrowUp, "Up"),
    (HidKeyCode::NumLock, "NumLk"),
    (HidKeyCode::NumpadDivide, "KP /"),
    (HidKeyCode::NumpadMultiply, "KP *"),
    (HidKeyCode::NumpadSubtract, "KP -"),
    (HidKeyCode::NumpadAdd, "KP +"),
    (HidKeyCode::NumpadEnter, "KP Enter"),
    (HidKeyCode::Numpad1, "KP 1"),
    (HidKeyCode::Numpad2, "KP 2"),
    (HidKeyCode::Numpad3, "KP 3"),
    (HidKeyCode::Numpad4, "KP 4"),
    (HidKeyCode::Numpad5, "KP 5"),
    (HidKeyCode::Numpad6, "KP 6"),
    (HidKeyCode::Numpad7, "KP 7"),
    (HidKeyCode::Numpad8, "KP 8"),
    (HidKeyCode::Numpad9, "KP 9"),
    (HidKeyCode::Numpad0, "KP 0"),
    (HidKeyCode::NumpadDecimal, "KP ."),
    (HidKeyCode::NonUsBackslash, "ISO \\"),
    (HidKeyCode::ContextMenu, "Menu"),
    (HidKeyCode::ControlLeft, "LCtrl"),
    (HidKeyCode::ShiftLeft, "LShift"),
    (HidKeyCode::AltLeft, "LAlt"),
    (HidKeyCode::MetaLeft, "LGui"),
    (HidKeyCode::ControlRight, "RCtrl"),
    (HidKeyCode::ShiftRight, "RShift"),
    (HidKeyCode::AltRight, "RAlt"),
    (HidKeyCode::MetaRight, "RGui"),
];

impl HidKeyCode {
    /// Converts a raw keyboard-page usage ID to a [`HidKeyCode`].
    ///
    /// Returns [`HidKeyCode::Unknown`] for IDs with no entry.
    pub fn from_u16(value: u16) -> Self {
        KEYBOARD_USAGES
            .iter()
            .find(|(code, _)| code.as_u16() == value)
            .map_or(HidKeyCode::Unknown, |(code, _)| *code)
    }

    /// Usage ID on page 0x07.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Short keycap label, or `None` for [`HidKeyCode::Unknown`].
    pub fn label(self) -> Option<&'static str> {
        KEYBOARD_USAGES
            .iter()
            .find(|(code, _)| *code == self)
            .map(|(_, label)| *label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_decodes_to_itself() {
        for &(code, _) in KEYBOARD_USAGES {
            assert_eq!(HidKeyCode::from_u16(code.as_u16()), code, "{code:?}");
        }
    }

    #[test]
    fn test_every_table_entry_has_a_non_empty_label() {
        for &(code, label) in KEYBOARD_USAGES {
            assert!(!label.is_empty(), "{code:?} has an empty label");
            assert!(!label.starts_with("Keyboard"), "{code:?} label keeps the long prefix");
        }
    }

    #[test]
    fn test_unassigned_ids_decode_to_unknown() {
        for unassigned in [0x00, 0x01, 0x02, 0x03, 0xA0, 0xFF, 0x1234] {
            assert_eq!(HidKeyCode::from_u16(unassigned), HidKeyCode::Unknown, "0x{unassigned:04X}");
        }
    }

    #[test]
    fn test_unknown_has_no_label() {
        assert_eq!(HidKeyCode::Unknown.label(), None);
        assert_eq!(HidKeyCode::Unknown.as_u16(), 0);
    }

    #[test]
    fn test_labels_for_common_keys() {
        assert_eq!(HidKeyCode::from_u16(0x04).label(), Some("A"));
        assert_eq!(HidKeyCode::from_u16(0x28).label(), Some("Enter"));
        assert_eq!(HidKeyCode::from_u16(0x2C).label(), Some("Space"));
        assert_eq!(HidKeyCode::from_u16(0xE1).label(), Some("LShift"));
    }

    #[test]
    fn test_letters_are_contiguous_from_0x04() {
        let letters: Vec<_> = KEYBOARD_USAGES.iter().take(26).collect();
        for (i, (code, label)) in letters.iter().enumerate() {
            assert_eq!(code.as_u16(), 0x04 + i as u16);
            assert_eq!(label.len(), 1);
        }
    }
}
