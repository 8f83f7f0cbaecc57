//! Screen geometry: device bounds and points in device coordinates.

use serde::{Deserialize, Serialize};

/// A point in device pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation between `self` and `to`, `t` in `0.0..=1.0`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// Size of the device surface the capability can touch.
///
/// Coordinates are valid in `0.0..=width` and `0.0..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    /// Create bounds; negative or NaN sizes collapse to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Clamp each axis of `point` independently into the bounds.
    ///
    /// A NaN coordinate is replaced by the matching axis of `fallback`.
    #[must_use]
    pub fn clamp(&self, point: Point, fallback: Point) -> Point {
        let x = if point.x.is_nan() { fallback.x } else { point.x };
        let y = if point.y.is_nan() { fallback.y } else { point.y };
        Point {
            x: x.clamp(0.0, self.width),
            y: y.clamp(0.0, self.height),
        }
    }

    /// Whether `point` lies inside the bounds (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1080.0, 1920.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_bounds_collapse_to_zero() {
        let b = Bounds::new(-5.0, f32::NAN);
        assert!(b.width().abs() < f32::EPSILON);
        assert!(b.height().abs() < f32::EPSILON);
    }

    #[test]
    fn clamp_saturates_each_axis() {
        let b = Bounds::new(1000.0, 500.0);
        let p = b.clamp(Point::new(1200.0, -40.0), Point::ORIGIN);
        assert_eq!(p, Point::new(1000.0, 0.0));
    }

    #[test]
    fn clamp_handles_infinities() {
        let b = Bounds::new(1000.0, 500.0);
        let p = b.clamp(Point::new(f32::INFINITY, f32::NEG_INFINITY), Point::ORIGIN);
        assert_eq!(p, Point::new(1000.0, 0.0));
    }

    #[test]
    fn clamp_replaces_nan_with_fallback() {
        let b = Bounds::new(1000.0, 500.0);
        let p = b.clamp(Point::new(f32::NAN, 20.0), Point::new(7.0, 9.0));
        assert_eq!(p, Point::new(7.0, 20.0));
    }

    #[test]
    fn contains_includes_edges() {
        let b = Bounds::new(100.0, 100.0);
        assert!(b.contains(Point::new(0.0, 100.0)));
        assert!(!b.contains(Point::new(100.5, 10.0)));
    }

    #[test]
    fn lerp_midpoint() {
        let p = Point::new(0.0, 100.0).lerp(Point::new(100.0, 300.0), 0.5);
        assert_eq!(p, Point::new(50.0, 200.0));
    }
}
