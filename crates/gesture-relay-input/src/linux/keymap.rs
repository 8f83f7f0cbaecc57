//! Mapping from platform action ids, keys and buttons to evdev codes.

use evdev::KeyCode as EvdevKey;
use gesture_relay_types::{Key, KeyState, MouseButton, PlatformActionId};

/// `KEY_APPSELECT`, the task switcher key.
const KEY_APPSELECT: EvdevKey = EvdevKey(0x244);

/// Keys the virtual device must advertise to perform global actions.
pub fn action_keys() -> [EvdevKey; 3] {
    [EvdevKey::KEY_BACK, EvdevKey::KEY_HOMEPAGE, KEY_APPSELECT]
}

/// The key that performs `action`, if this backend can express it.
///
/// Notifications, quick settings and the power dialog have no key a
/// compositor reliably binds, so they are not mapped.
pub fn action_to_evdev_key(action: PlatformActionId) -> Option<EvdevKey> {
    match action {
        PlatformActionId::BACK => Some(EvdevKey::KEY_BACK),
        PlatformActionId::HOME => Some(EvdevKey::KEY_HOMEPAGE),
        PlatformActionId::RECENTS => Some(KEY_APPSELECT),
        _ => None,
    }
}

/// Convert a `Key` to the evdev key code.
pub fn key_to_evdev_key(key: Key) -> EvdevKey {
    match key {
        Key::KeyA => EvdevKey::KEY_A,
        Key::KeyB => EvdevKey::KEY_B,
        Key::KeyC => EvdevKey::KEY_C,
        Key::KeyD => EvdevKey::KEY_D,
        Key::KeyE => EvdevKey::KEY_E,
        Key::KeyF => EvdevKey::KEY_F,
        Key::KeyG => EvdevKey::KEY_G,
        Key::KeyH => EvdevKey::KEY_H,
        Key::KeyI => EvdevKey::KEY_I,
        Key::KeyJ => EvdevKey::KEY_J,
        Key::KeyK => EvdevKey::KEY_K,
        Key::KeyL => EvdevKey::KEY_L,
        Key::KeyM => EvdevKey::KEY_M,
        Key::KeyN => EvdevKey::KEY_N,
        Key::KeyO => EvdevKey::KEY_O,
        Key::KeyP => EvdevKey::KEY_P,
        Key::KeyQ => EvdevKey::KEY_Q,
        Key::KeyR => EvdevKey::KEY_R,
        Key::KeyS => EvdevKey::KEY_S,
        Key::KeyT => EvdevKey::KEY_T,
        Key::KeyU => EvdevKey::KEY_U,
        Key::KeyV => EvdevKey::KEY_V,
        Key::KeyW => EvdevKey::KEY_W,
        Key::KeyX => EvdevKey::KEY_X,
        Key::KeyY => EvdevKey::KEY_Y,
        Key::KeyZ => EvdevKey::KEY_Z,

        Key::Digit0 => EvdevKey::KEY_0,
        Key::Digit1 => EvdevKey::KEY_1,
        Key::Digit2 => EvdevKey::KEY_2,
        Key::Digit3 => EvdevKey::KEY_3,
        Key::Digit4 => EvdevKey::KEY_4,
        Key::Digit5 => EvdevKey::KEY_5,
        Key::Digit6 => EvdevKey::KEY_6,
        Key::Digit7 => EvdevKey::KEY_7,
        Key::Digit8 => EvdevKey::KEY_8,
        Key::Digit9 => EvdevKey::KEY_9,

        Key::F1 => EvdevKey::KEY_F1,
        Key::F2 => EvdevKey::KEY_F2,
        Key::F3 => EvdevKey::KEY_F3,
        Key::F4 => EvdevKey::KEY_F4,
        Key::F5 => EvdevKey::KEY_F5,
        Key::F6 => EvdevKey::KEY_F6,
        Key::F7 => EvdevKey::KEY_F7,
        Key::F8 => EvdevKey::KEY_F8,
        Key::F9 => EvdevKey::KEY_F9,
        Key::F10 => EvdevKey::KEY_F10,
        Key::F11 => EvdevKey::KEY_F11,
        Key::F12 => EvdevKey::KEY_F12,

        Key::Enter => EvdevKey::KEY_ENTER,
        Key::Escape => EvdevKey::KEY_ESC,
        Key::Backspace => EvdevKey::KEY_BACKSPACE,
        Key::Tab => EvdevKey::KEY_TAB,
        Key::Space => EvdevKey::KEY_SPACE,
        Key::ArrowLeft => EvdevKey::KEY_LEFT,
        Key::ArrowRight => EvdevKey::KEY_RIGHT,
        Key::ArrowUp => EvdevKey::KEY_UP,
        Key::ArrowDown => EvdevKey::KEY_DOWN,
        Key::Home => EvdevKey::KEY_HOME,
        Key::End => EvdevKey::KEY_END,
        Key::PageUp => EvdevKey::KEY_PAGEUP,
        Key::PageDown => EvdevKey::KEY_PAGEDOWN,
        Key::Insert => EvdevKey::KEY_INSERT,
        Key::Delete => EvdevKey::KEY_DELETE,

        Key::Shift => EvdevKey::KEY_LEFTSHIFT,
        Key::Control => EvdevKey::KEY_LEFTCTRL,
        Key::Alt => EvdevKey::KEY_LEFTALT,
        Key::Meta => EvdevKey::KEY_LEFTMETA,
        Key::CapsLock => EvdevKey::KEY_CAPSLOCK,

        Key::Minus => EvdevKey::KEY_MINUS,
        Key::Equal => EvdevKey::KEY_EQUAL,
        Key::Comma => EvdevKey::KEY_COMMA,
        Key::Period => EvdevKey::KEY_DOT,
        Key::Slash => EvdevKey::KEY_SLASH,

        Key::VolumeUp => EvdevKey::KEY_VOLUMEUP,
        Key::VolumeDown => EvdevKey::KEY_VOLUMEDOWN,
        Key::Mute => EvdevKey::KEY_MUTE,
    }
}

pub fn mouse_button_to_evdev_key(button: MouseButton) -> EvdevKey {
    match button {
        MouseButton::Left => EvdevKey::BTN_LEFT,
        MouseButton::Right => EvdevKey::BTN_RIGHT,
        MouseButton::Middle => EvdevKey::BTN_MIDDLE,
    }
}

pub fn key_state_to_evdev_value(state: KeyState) -> i32 {
    match state {
        KeyState::Pressed => 1,
        KeyState::Released => 0,
    }
}
