//! Gesture construction errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("gesture must contain at least one stroke")]
    Empty,

    #[error("stroke duration must be greater than zero")]
    ZeroDuration,

    #[error("gesture has {count} strokes, at most {max} are allowed")]
    TooManyStrokes { count: usize, max: usize },

    #[error("gesture lasts {duration_ms}ms, at most {max_ms}ms is allowed")]
    TooLong { duration_ms: u64, max_ms: u64 },

    #[error("coordinate is not a finite number")]
    NonFiniteCoordinate,

    #[error("unknown global action: {0}")]
    UnknownAction(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),
}
