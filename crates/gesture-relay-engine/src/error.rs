//! Engine errors.
//!
//! Runtime failures (capability unavailable, gesture cancelled) are not
//! errors: they surface as `false` results. Only bad input and setup
//! problems are reported here.

use gesture_relay_types::GestureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] GestureError),

    #[error("unsupported command")]
    Unsupported,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(#[from] gesture_relay_input::InputError),
}

impl EngineError {
    /// Whether the caller sent something the engine cannot act on.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Unsupported)
    }
}
