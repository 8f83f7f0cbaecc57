//! Pointer-button, wheel and keyboard input.
//!
//! These complement touch gestures on backends that can also drive a pointer
//! or keyboard. Keys travel as names on the wire (`"enter"`, `"a"`, `"f5"`)
//! and are resolved with [`Key::from_str`], so an unknown name is a bad
//! argument rather than a malformed command.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GestureError;

/// Pointer button for a click at the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary button, performed as a tap.
    #[default]
    Left,
    Right,
    Middle,
}

/// Button or key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,

    // Digits
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Editing and navigation
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,

    // Modifiers
    Shift,
    Control,
    Alt,
    Meta,
    CapsLock,

    // Punctuation
    Minus,
    Equal,
    Comma,
    Period,
    Slash,

    // Media
    VolumeUp,
    VolumeDown,
    Mute,
}

impl Key {
    /// Every key, in declaration order.
    pub const ALL: [Self; 76] = [
        Self::KeyA,
        Self::KeyB,
        Self::KeyC,
        Self::KeyD,
        Self::KeyE,
        Self::KeyF,
        Self::KeyG,
        Self::KeyH,
        Self::KeyI,
        Self::KeyJ,
        Self::KeyK,
        Self::KeyL,
        Self::KeyM,
        Self::KeyN,
        Self::KeyO,
        Self::KeyP,
        Self::KeyQ,
        Self::KeyR,
        Self::KeyS,
        Self::KeyT,
        Self::KeyU,
        Self::KeyV,
        Self::KeyW,
        Self::KeyX,
        Self::KeyY,
        Self::KeyZ,
        Self::Digit0,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
        Self::Enter,
        Self::Escape,
        Self::Backspace,
        Self::Tab,
        Self::Space,
        Self::ArrowLeft,
        Self::ArrowRight,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::Home,
        Self::End,
        Self::PageUp,
        Self::PageDown,
        Self::Insert,
        Self::Delete,
        Self::Shift,
        Self::Control,
        Self::Alt,
        Self::Meta,
        Self::CapsLock,
        Self::Minus,
        Self::Equal,
        Self::Comma,
        Self::Period,
        Self::Slash,
        Self::VolumeUp,
        Self::VolumeDown,
        Self::Mute,
    ];

    /// Name accepted on the wire.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::KeyA => "a",
            Self::KeyB => "b",
            Self::KeyC => "c",
            Self::KeyD => "d",
            Self::KeyE => "e",
            Self::KeyF => "f",
            Self::KeyG => "g",
            Self::KeyH => "h",
            Self::KeyI => "i",
            Self::KeyJ => "j",
            Self::KeyK => "k",
            Self::KeyL => "l",
            Self::KeyM => "m",
            Self::KeyN => "n",
            Self::KeyO => "o",
            Self::KeyP => "p",
            Self::KeyQ => "q",
            Self::KeyR => "r",
            Self::KeyS => "s",
            Self::KeyT => "t",
            Self::KeyU => "u",
            Self::KeyV => "v",
            Self::KeyW => "w",
            Self::KeyX => "x",
            Self::KeyY => "y",
            Self::KeyZ => "z",
            Self::Digit0 => "0",
            Self::Digit1 => "1",
            Self::Digit2 => "2",
            Self::Digit3 => "3",
            Self::Digit4 => "4",
            Self::Digit5 => "5",
            Self::Digit6 => "6",
            Self::Digit7 => "7",
            Self::Digit8 => "8",
            Self::Digit9 => "9",
            Self::F1 => "f1",
            Self::F2 => "f2",
            Self::F3 => "f3",
            Self::F4 => "f4",
            Self::F5 => "f5",
            Self::F6 => "f6",
            Self::F7 => "f7",
            Self::F8 => "f8",
            Self::F9 => "f9",
            Self::F10 => "f10",
            Self::F11 => "f11",
            Self::F12 => "f12",
            Self::Enter => "enter",
            Self::Escape => "escape",
            Self::Backspace => "backspace",
            Self::Tab => "tab",
            Self::Space => "space",
            Self::ArrowLeft => "left",
            Self::ArrowRight => "right",
            Self::ArrowUp => "up",
            Self::ArrowDown => "down",
            Self::Home => "home",
            Self::End => "end",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Shift => "shift",
            Self::Control => "control",
            Self::Alt => "alt",
            Self::Meta => "meta",
            Self::CapsLock => "caps_lock",
            Self::Minus => "minus",
            Self::Equal => "equal",
            Self::Comma => "comma",
            Self::Period => "period",
            Self::Slash => "slash",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::Mute => "mute",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| key.name() == normalised)
            .ok_or_else(|| GestureError::UnknownKey(s.to_string()))
    }
}

/// One low-level pointer or keyboard event for a backend to inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceInput {
    Button { button: MouseButton, state: KeyState },
    /// Wheel motion in detents. Positive `dy` scrolls up, positive `dx`
    /// scrolls right.
    Scroll { dx: i32, dy: i32 },
    Key { key: Key, state: KeyState },
}

impl DeviceInput {
    /// Press then release of `button`.
    #[must_use]
    pub fn click(button: MouseButton) -> [Self; 2] {
        [
            Self::Button {
                button,
                state: KeyState::Pressed,
            },
            Self::Button {
                button,
                state: KeyState::Released,
            },
        ]
    }

    /// Press then release of `key`.
    #[must_use]
    pub fn key_press(key: Key) -> [Self; 2] {
        [
            Self::Key {
                key,
                state: KeyState::Pressed,
            },
            Self::Key {
                key,
                state: KeyState::Released,
            },
        ]
    }
}
