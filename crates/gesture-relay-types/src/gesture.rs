//! Gesture model: touch points, strokes, gestures and their outcomes.
//!
//! A [`Gesture`] is one atomic input event made of one or more timed
//! [`Stroke`]s. Strokes carry their own start offset and duration so that
//! staggered multi-touch can be expressed in a single gesture.

use serde::{Deserialize, Serialize};

use crate::error::GestureError;
use crate::screen::Point;

/// Maximum number of strokes in a single gesture.
pub const MAX_STROKES: usize = 20;

/// Maximum time from gesture start to the end of its last stroke.
pub const MAX_GESTURE_DURATION_MS: u64 = 60_000;

fn default_touch_duration() -> u64 {
    100
}

/// One contact in a multi-touch command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    /// Delay from gesture start until this contact goes down.
    #[serde(default)]
    pub start_offset_ms: u64,
    /// How long the contact is held.
    #[serde(default = "default_touch_duration")]
    pub duration_ms: u64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(x: f32, y: f32, start_offset_ms: u64, duration_ms: u64) -> Self {
        Self {
            x,
            y,
            start_offset_ms,
            duration_ms,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Geometric path of a single stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokePath {
    /// A stationary contact.
    Point(Point),
    /// A straight line, interpolated linearly over the stroke duration.
    Line { from: Point, to: Point },
}

impl StrokePath {
    #[must_use]
    pub fn start(&self) -> Point {
        match self {
            Self::Point(p) => *p,
            Self::Line { from, .. } => *from,
        }
    }

    #[must_use]
    pub fn end(&self) -> Point {
        match self {
            Self::Point(p) => *p,
            Self::Line { to, .. } => *to,
        }
    }

    /// Waypoints in order: one for a point, two for a line.
    #[must_use]
    pub fn waypoints(&self) -> Vec<Point> {
        match self {
            Self::Point(p) => vec![*p],
            Self::Line { from, to } => vec![*from, *to],
        }
    }

    fn is_finite(&self) -> bool {
        self.waypoints().iter().all(Point::is_finite)
    }
}

/// One contact's path and timing within a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    path: StrokePath,
    start_offset_ms: u64,
    duration_ms: u64,
}

impl Stroke {
    /// Create a stroke. Fails on a zero duration or a non-finite waypoint.
    pub fn new(path: StrokePath, start_offset_ms: u64, duration_ms: u64) -> Result<Self, GestureError> {
        if duration_ms == 0 {
            return Err(GestureError::ZeroDuration);
        }
        if !path.is_finite() {
            return Err(GestureError::NonFiniteCoordinate);
        }
        Ok(Self {
            path,
            start_offset_ms,
            duration_ms,
        })
    }

    #[must_use]
    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    #[must_use]
    pub fn start_offset_ms(&self) -> u64 {
        self.start_offset_ms
    }

    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Offset from gesture start at which this contact lifts.
    #[must_use]
    pub fn end_offset_ms(&self) -> u64 {
        self.start_offset_ms.saturating_add(self.duration_ms)
    }

    /// Whether the contact is down at `elapsed_ms` after gesture start.
    #[must_use]
    pub fn is_active_at(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.start_offset_ms && elapsed_ms < self.end_offset_ms()
    }

    /// Position of the contact at `elapsed_ms` after gesture start.
    ///
    /// Before the stroke starts this is the start point, after it ends the
    /// end point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position_at(&self, elapsed_ms: u64) -> Point {
        match self.path {
            StrokePath::Point(p) => p,
            StrokePath::Line { from, to } => {
                let into = elapsed_ms.saturating_sub(self.start_offset_ms);
                let t = into as f32 / self.duration_ms as f32;
                from.lerp(to, t)
            }
        }
    }
}

/// One or more strokes dispatched together as a single input event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gesture {
    strokes: Vec<Stroke>,
}

impl Gesture {
    /// Combine strokes into a gesture.
    ///
    /// Fails when `strokes` is empty, holds more than [`MAX_STROKES`], or
    /// ends later than [`MAX_GESTURE_DURATION_MS`].
    pub fn new(strokes: Vec<Stroke>) -> Result<Self, GestureError> {
        if strokes.is_empty() {
            return Err(GestureError::Empty);
        }
        if strokes.len() > MAX_STROKES {
            return Err(GestureError::TooManyStrokes {
                count: strokes.len(),
                max: MAX_STROKES,
            });
        }
        let gesture = Self { strokes };
        let duration_ms = gesture.total_duration_ms();
        if duration_ms > MAX_GESTURE_DURATION_MS {
            return Err(GestureError::TooLong {
                duration_ms,
                max_ms: MAX_GESTURE_DURATION_MS,
            });
        }
        Ok(gesture)
    }

    /// A gesture made of one stroke.
    pub fn single(stroke: Stroke) -> Result<Self, GestureError> {
        Self::new(vec![stroke])
    }

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Time from gesture start until the last contact lifts.
    #[must_use]
    pub fn total_duration_ms(&self) -> u64 {
        self.strokes
            .iter()
            .map(Stroke::end_offset_ms)
            .max()
            .unwrap_or(0)
    }
}

/// Final result of a dispatched gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureOutcome {
    Completed,
    Cancelled,
}

impl GestureOutcome {
    #[must_use]
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

impl std::fmt::Display for GestureOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(x: f32, y: f32, offset: u64, duration: u64) -> Stroke {
        Stroke::new(StrokePath::Point(Point::new(x, y)), offset, duration).unwrap()
    }

    #[test]
    fn zero_duration_stroke_rejected() {
        let err = Stroke::new(StrokePath::Point(Point::ORIGIN), 0, 0).unwrap_err();
        assert_eq!(err, GestureError::ZeroDuration);
    }

    #[test]
    fn non_finite_waypoint_rejected() {
        let path = StrokePath::Line {
            from: Point::ORIGIN,
            to: Point::new(f32::NAN, 1.0),
        };
        let err = Stroke::new(path, 0, 10).unwrap_err();
        assert_eq!(err, GestureError::NonFiniteCoordinate);
    }

    #[test]
    fn empty_gesture_rejected() {
        assert_eq!(Gesture::new(Vec::new()).unwrap_err(), GestureError::Empty);
    }

    #[test]
    fn too_many_strokes_rejected() {
        let strokes = vec![tap(1.0, 1.0, 0, 10); MAX_STROKES + 1];
        assert!(matches!(
            Gesture::new(strokes),
            Err(GestureError::TooManyStrokes { count, .. }) if count == MAX_STROKES + 1
        ));
    }

    #[test]
    fn overlong_gesture_rejected() {
        let strokes = vec![tap(1.0, 1.0, MAX_GESTURE_DURATION_MS, 1)];
        assert!(matches!(
            Gesture::new(strokes),
            Err(GestureError::TooLong { .. })
        ));
    }

    #[test]
    fn total_duration_is_latest_stroke_end() {
        let gesture = Gesture::new(vec![tap(1.0, 1.0, 0, 100), tap(2.0, 2.0, 250, 100)]).unwrap();
        assert_eq!(gesture.total_duration_ms(), 350);
        assert_eq!(gesture.stroke_count(), 2);
    }

    #[test]
    fn stroke_activity_window_is_half_open() {
        let stroke = tap(1.0, 1.0, 50, 100);
        assert!(!stroke.is_active_at(49));
        assert!(stroke.is_active_at(50));
        assert!(stroke.is_active_at(149));
        assert!(!stroke.is_active_at(150));
    }

    #[test]
    fn line_position_interpolates() {
        let path = StrokePath::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(300.0, 0.0),
        };
        let stroke = Stroke::new(path, 100, 300).unwrap();
        assert_eq!(stroke.position_at(0), Point::new(0.0, 0.0));
        assert_eq!(stroke.position_at(250), Point::new(150.0, 0.0));
        assert_eq!(stroke.position_at(1_000), Point::new(300.0, 0.0));
    }

    #[test]
    fn touch_point_defaults_from_json() {
        let point: TouchPoint = serde_json::from_str(r#"{"x": 10.0, "y": 20.0}"#).unwrap();
        assert_eq!(point, TouchPoint::new(10.0, 20.0, 0, 100));
    }
}
