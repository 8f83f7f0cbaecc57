//! Logical cursor for relative-motion commands.

use gesture_relay_types::{Bounds, Point};

/// Logical pointer position clamped to the device bounds.
///
/// `0 <= x <= width` and `0 <= y <= height` hold after every mutation.
/// Out-of-range input saturates at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    position: Point,
    bounds: Bounds,
}

impl CursorState {
    /// A cursor at the origin.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            position: Point::ORIGIN,
            bounds,
        }
    }

    /// Move by a relative delta and return the new position.
    ///
    /// A NaN delta leaves that axis unchanged.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> Point {
        let target = Point::new(self.position.x + dx, self.position.y + dy);
        self.position = self.bounds.clamp(target, self.position);
        self.position
    }

    /// Move to an absolute position and return where the cursor landed.
    pub fn set(&mut self, x: f32, y: f32) -> Point {
        self.position = self.bounds.clamp(Point::new(x, y), self.position);
        self.position
    }

    pub fn get(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Clamp an arbitrary point into the cursor's bounds.
    pub fn clamp(&self, point: Point) -> Point {
        self.bounds.clamp(point, self.position)
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(Bounds::new(0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_bounds(cursor: &CursorState) -> bool {
        cursor.bounds().contains(cursor.get())
    }

    #[test]
    fn starts_at_origin() {
        let cursor = CursorState::new(Bounds::new(1000.0, 1000.0));
        assert_eq!(cursor.get(), Point::ORIGIN);
    }

    #[test]
    fn deltas_accumulate_then_saturate() {
        let mut cursor = CursorState::new(Bounds::new(1000.0, 1000.0));
        cursor.move_by(300.0, 300.0);
        cursor.move_by(300.0, 300.0);
        assert_eq!(cursor.move_by(300.0, 300.0), Point::new(900.0, 900.0));
        assert_eq!(cursor.move_by(300.0, 300.0), Point::new(1000.0, 1000.0));
    }

    #[test]
    fn negative_deltas_stop_at_zero() {
        let mut cursor = CursorState::new(Bounds::new(500.0, 500.0));
        cursor.set(100.0, 50.0);
        assert_eq!(cursor.move_by(-250.0, -1.0), Point::new(0.0, 49.0));
        assert_eq!(cursor.move_by(10.0, 0.0), Point::new(10.0, 49.0));
    }

    #[test]
    fn axes_clamp_independently() {
        let mut cursor = CursorState::new(Bounds::new(800.0, 600.0));
        assert_eq!(cursor.move_by(5_000.0, 20.0), Point::new(800.0, 20.0));
    }

    #[test]
    fn clamping_invariant_over_arbitrary_sequences() {
        let mut cursor = CursorState::new(Bounds::new(1920.0, 1080.0));
        let deltas = [
            (1e9, -1e9),
            (-3.5, 7.25),
            (f32::MAX, f32::MIN),
            (f32::INFINITY, f32::NEG_INFINITY),
            (-0.0, 0.0),
            (42.0, 1_079.9),
            (f32::NAN, 12.0),
            (-1e-3, 1e-3),
        ];
        for _ in 0..10 {
            for (dx, dy) in deltas {
                cursor.move_by(dx, dy);
                assert!(within_bounds(&cursor), "escaped bounds: {:?}", cursor.get());
            }
        }
    }

    #[test]
    fn nan_delta_keeps_axis() {
        let mut cursor = CursorState::new(Bounds::new(100.0, 100.0));
        cursor.set(40.0, 60.0);
        assert_eq!(cursor.move_by(f32::NAN, 5.0), Point::new(40.0, 65.0));
    }

    #[test]
    fn set_is_clamped() {
        let mut cursor = CursorState::new(Bounds::new(100.0, 100.0));
        assert_eq!(cursor.set(-5.0, 250.0), Point::new(0.0, 100.0));
    }

    #[test]
    fn read_is_idempotent() {
        let mut cursor = CursorState::new(Bounds::new(100.0, 100.0));
        cursor.move_by(12.5, 33.0);
        assert_eq!(cursor.get(), cursor.get());
    }
}
