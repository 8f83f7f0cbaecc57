//! Shared types for gesture-relay.
//!
//! This crate contains all types shared across the gesture-relay workspace:
//! screen geometry, touch points, strokes and gestures, global navigation
//! actions, pointer and keyboard input, and the command/response surface
//! exposed to remote controllers.

pub mod action;
pub mod command;
pub mod error;
pub mod gesture;
pub mod input;
pub mod screen;

pub use action::{GlobalAction, PlatformActionId};
pub use command::{Command, Response};
pub use error::GestureError;
pub use gesture::{
    Gesture, GestureOutcome, Stroke, StrokePath, TouchPoint, MAX_GESTURE_DURATION_MS, MAX_STROKES,
};
pub use input::{DeviceInput, Key, KeyState, MouseButton};
pub use screen::{Bounds, Point};
