//! Command surface exposed to remote controllers.
//!
//! Commands are a closed set; anything the decoder does not recognise lands
//! in [`Command::Unsupported`]. Coordinates are always required, durations
//! are optional and resolved to documented defaults by the dispatcher.
//! Action and key names stay strings here and are resolved by the
//! dispatcher, so an unknown name is reported as a bad argument.

use serde::{Deserialize, Serialize};

use crate::action::GlobalAction;
use crate::gesture::TouchPoint;
use crate::input::MouseButton;
use crate::screen::Point;

/// A typed input command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Short touch at an absolute position.
    Tap {
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },

    /// Straight-line drag between two absolute positions.
    Swipe {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },

    /// Touch held at an absolute position.
    LongPress {
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },

    /// Click at the current cursor position. The left button is a tap.
    Click {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
        #[serde(default)]
        button: MouseButton,
    },

    /// Device-level navigation action, by name (see [`GlobalAction`]).
    Global { action: String },

    /// Wheel motion in detents; positive `dy` is up, positive `dx` is right.
    Scroll {
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dy: i32,
    },

    /// Press and release a named key.
    KeyPress { key: String },

    /// Press a named key and keep it down.
    KeyDown { key: String },

    /// Release a named key.
    KeyUp { key: String },

    /// Move the cursor by a relative delta.
    RelativeMove { dx: f32, dy: f32 },

    /// Read the cursor position.
    GetPosition,

    /// Move the cursor to an absolute position.
    SetPosition { x: f32, y: f32 },

    /// Several contacts with independent timing, dispatched as one gesture.
    MultiTouch { points: Vec<TouchPoint> },

    /// Whether the input capability is attached.
    IsAvailable,

    /// Ask the user to enable the input capability.
    RequestEnable,

    /// A command this version does not know.
    #[serde(other)]
    Unsupported,
}

impl Command {
    #[must_use]
    pub fn tap(x: f32, y: f32) -> Self {
        Self::Tap {
            x,
            y,
            duration_ms: None,
        }
    }

    #[must_use]
    pub fn swipe(from: Point, to: Point) -> Self {
        Self::Swipe {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            duration_ms: None,
        }
    }

    #[must_use]
    pub fn long_press(x: f32, y: f32) -> Self {
        Self::LongPress {
            x,
            y,
            duration_ms: None,
        }
    }

    #[must_use]
    pub fn click(button: MouseButton) -> Self {
        Self::Click {
            duration_ms: None,
            button,
        }
    }

    #[must_use]
    pub fn global(action: GlobalAction) -> Self {
        Self::Global {
            action: action.name().to_string(),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tap { .. } => "tap",
            Self::Swipe { .. } => "swipe",
            Self::LongPress { .. } => "long_press",
            Self::Click { .. } => "click",
            Self::Global { .. } => "global",
            Self::Scroll { .. } => "scroll",
            Self::KeyPress { .. } => "key_press",
            Self::KeyDown { .. } => "key_down",
            Self::KeyUp { .. } => "key_up",
            Self::RelativeMove { .. } => "relative_move",
            Self::GetPosition => "get_position",
            Self::SetPosition { .. } => "set_position",
            Self::MultiTouch { .. } => "multi_touch",
            Self::IsAvailable => "is_available",
            Self::RequestEnable => "request_enable",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Result of a command, as reported back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Whether the requested motion or action happened.
    Done(bool),
    /// Current cursor position.
    Position(Point),
    /// Whether the input capability is attached.
    Available(bool),
    /// Fire-and-forget request acknowledged.
    Accepted,
}

impl Response {
    /// `false` only for a `Done(false)` or `Available(false)` result.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Done(ok) | Self::Available(ok) => *ok,
            Self::Position(_) | Self::Accepted => true,
        }
    }
}
