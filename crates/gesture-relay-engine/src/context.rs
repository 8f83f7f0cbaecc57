//! Shared engine state: the cursor and the availability flag.

use std::sync::{Mutex, MutexGuard, PoisonError};

use gesture_relay_types::{Bounds, Point};
use tracing::debug;

use crate::availability::ServiceAvailability;
use crate::cursor::CursorState;

/// One logical engine: cursor plus capability availability.
///
/// Attach and detach take the cursor lock before flipping availability, so
/// anything done under [`EngineContext::with_cursor`] sees a consistent
/// pair.
#[derive(Debug, Default)]
pub struct EngineContext {
    cursor: Mutex<CursorState>,
    availability: ServiceAvailability,
}

impl EngineContext {
    /// A detached context with an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The capability became usable: reset the cursor to the origin of
    /// `bounds` and mark available.
    pub fn attach(&self, bounds: Bounds) -> u64 {
        let mut cursor = self.lock_cursor();
        *cursor = CursorState::new(bounds);
        let generation = self.availability.attach();
        debug!(
            generation,
            width = bounds.width(),
            height = bounds.height(),
            "cursor reset for new attachment"
        );
        generation
    }

    /// The capability went away. The cursor keeps its last position.
    pub fn detach(&self) -> bool {
        let _cursor = self.lock_cursor();
        self.availability.detach()
    }

    pub fn availability(&self) -> &ServiceAvailability {
        &self.availability
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    /// Last known cursor position.
    pub fn position(&self) -> Point {
        self.lock_cursor().get()
    }

    pub fn bounds(&self) -> Bounds {
        self.lock_cursor().bounds()
    }

    /// Run `f` with exclusive access to the cursor and the availability
    /// observed under the same lock.
    pub fn with_cursor<R>(&self, f: impl FnOnce(&mut CursorState, bool) -> R) -> R {
        let mut cursor = self.lock_cursor();
        let available = self.availability.is_available();
        f(&mut cursor, available)
    }

    fn lock_cursor(&self) -> MutexGuard<'_, CursorState> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
