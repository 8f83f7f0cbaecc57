//! Gesture simulation engine for gesture-relay.
//!
//! Turns typed input commands into timed gestures, tracks a logical cursor
//! for relative-motion commands, and gates everything on whether the
//! underlying input capability is attached.

pub mod actions;
pub mod availability;
pub mod composer;
pub mod config;
pub mod context;
pub mod cursor;
pub mod dispatcher;
pub mod error;
pub mod execution;
pub mod setup;

pub use actions::GlobalActionMap;
pub use availability::{Attachment, ServiceAvailability};
pub use composer::GestureComposer;
pub use config::Config;
pub use context::EngineContext;
pub use cursor::CursorState;
pub use dispatcher::{CommandDispatcher, PendingGesture, SettingsOpener, Submission};
pub use error::EngineError;
pub use execution::{GestureExecutionEngine, GestureHandle};
