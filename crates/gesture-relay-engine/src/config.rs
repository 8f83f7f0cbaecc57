//! Engine configuration loaded from TOML.

use gesture_relay_types::Bounds;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub gestures: GestureDefaults,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Config {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        let g = &self.gestures;
        if g.tap_ms == 0 || g.swipe_ms == 0 || g.long_press_ms == 0 {
            return Err(EngineError::Config(
                "gesture durations must be greater than zero".to_string(),
            ));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(EngineError::Config(
                "display width and height must be greater than zero".to_string(),
            ));
        }
        if self.backend.frame_interval_ms == 0 {
            return Err(EngineError::Config(
                "backend frame_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Size of the touch surface reported when the capability attaches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_display_width")]
    pub width: u32,
    #[serde(default = "default_display_height")]
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_display_width(),
            height: default_display_height(),
        }
    }
}

impl DisplayConfig {
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width as f32, self.height as f32)
    }
}

/// Durations used when a command omits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureDefaults {
    #[serde(default = "default_tap_ms")]
    pub tap_ms: u64,
    #[serde(default = "default_swipe_ms")]
    pub swipe_ms: u64,
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
}

impl Default for GestureDefaults {
    fn default() -> Self {
        Self {
            tap_ms: default_tap_ms(),
            swipe_ms: default_swipe_ms(),
            long_press_ms: default_long_press_ms(),
        }
    }
}

/// Which gesture backend the binary drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Virtual touchscreen through uinput (Linux only).
    #[default]
    Uinput,
    /// In-memory recording backend; gestures complete after their duration.
    Mock,
}

/// Gesture backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    #[serde(default = "default_device_name")]
    pub device_name: String,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            device_name: default_device_name(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_display_width() -> u32 {
    1080
}

fn default_display_height() -> u32 {
    1920
}

fn default_tap_ms() -> u64 {
    100
}

fn default_swipe_ms() -> u64 {
    300
}

fn default_long_press_ms() -> u64 {
    1000
}

fn default_device_name() -> String {
    "gesture-relay touchscreen".to_string()
}

fn default_frame_interval_ms() -> u64 {
    8
}
