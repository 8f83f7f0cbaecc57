//! Builds gestures from command geometry.

use gesture_relay_types::{Gesture, GestureError, Point, Stroke, StrokePath, TouchPoint};

use crate::config::GestureDefaults;
use crate::error::EngineError;

/// Pure gesture builder. Omitted durations resolve to the configured defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureComposer {
    defaults: GestureDefaults,
}

impl GestureComposer {
    pub fn new(defaults: GestureDefaults) -> Self {
        Self { defaults }
    }

    /// One stationary stroke at `at`.
    pub fn tap(&self, at: Point, duration_ms: Option<u64>) -> Result<Gesture, EngineError> {
        hold(at, duration_ms.unwrap_or(self.defaults.tap_ms))
    }

    /// One straight stroke from `from` to `to`.
    pub fn swipe(
        &self,
        from: Point,
        to: Point,
        duration_ms: Option<u64>,
    ) -> Result<Gesture, EngineError> {
        let duration = duration_ms.unwrap_or(self.defaults.swipe_ms);
        let stroke = Stroke::new(StrokePath::Line { from, to }, 0, duration)?;
        Ok(Gesture::single(stroke)?)
    }

    /// A tap held for the long-press default.
    pub fn long_press(&self, at: Point, duration_ms: Option<u64>) -> Result<Gesture, EngineError> {
        hold(at, duration_ms.unwrap_or(self.defaults.long_press_ms))
    }

    /// One stroke per touch point, each keeping its own timing.
    pub fn multi_touch(&self, points: &[TouchPoint]) -> Result<Gesture, EngineError> {
        if points.is_empty() {
            return Err(GestureError::Empty.into());
        }
        let strokes = points
            .iter()
            .map(|p| Stroke::new(StrokePath::Point(p.position()), p.start_offset_ms, p.duration_ms))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Gesture::new(strokes)?)
    }
}

fn hold(at: Point, duration_ms: u64) -> Result<Gesture, EngineError> {
    let stroke = Stroke::new(StrokePath::Point(at), 0, duration_ms)?;
    Ok(Gesture::single(stroke)?)
}
