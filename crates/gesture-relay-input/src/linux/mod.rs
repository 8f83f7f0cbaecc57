//! Linux backend: a uinput virtual multitouch touchscreen.

mod keymap;
mod touchscreen;

pub use touchscreen::{TouchscreenConfig, UinputTouchscreen};
