//! Gesture dispatch backends for gesture-relay.
//!
//! This crate defines the [`GestureBackend`] trait that the engine submits
//! composed gestures, global actions and pointer/keyboard input to, plus the one-shot
//! [`GestureCallback`] a backend resolves when a gesture finishes. The
//! uinput touchscreen backend (Linux) lives behind the `linux` feature and
//! the recording backend used by tests behind `mock`.

use async_trait::async_trait;
use gesture_relay_types::{DeviceInput, Gesture, GestureOutcome, PlatformActionId};
use tokio::sync::oneshot;

pub mod error;
#[cfg(feature = "linux")]
pub mod linux;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::InputError;

/// Identifier assigned by the engine to each submitted gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(pub u64);

impl std::fmt::Display for GestureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Completion callback for one submitted gesture.
///
/// Resolving consumes the callback, so a backend can report at most one
/// outcome. Dropping it unresolved is reported to the engine as
/// [`GestureOutcome::Cancelled`].
#[derive(Debug)]
pub struct GestureCallback {
    id: GestureId,
    tx: oneshot::Sender<GestureOutcome>,
}

impl GestureCallback {
    /// Create a callback and the receiver its outcome is delivered to.
    pub fn new(id: GestureId) -> (Self, oneshot::Receiver<GestureOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Self { id, tx }, rx)
    }

    pub fn id(&self) -> GestureId {
        self.id
    }

    /// Report the outcome. Returns `false` if nobody is waiting any more.
    pub fn resolve(self, outcome: GestureOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }

    pub fn complete(self) -> bool {
        self.resolve(GestureOutcome::Completed)
    }

    pub fn cancel(self) -> bool {
        self.resolve(GestureOutcome::Cancelled)
    }

    /// Whether the waiting side has gone away.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Synthesizes gestures and global actions on the target device.
#[async_trait]
pub trait GestureBackend: Send + Sync + 'static {
    /// Submit a gesture for playback.
    ///
    /// `Ok(())` means the gesture was accepted and `callback` will be
    /// resolved (or dropped) once playback ends. Must return without waiting
    /// for playback to finish.
    async fn dispatch_gesture(
        &self,
        gesture: Gesture,
        callback: GestureCallback,
    ) -> Result<(), InputError>;

    /// Perform a global action. `Ok(())` means the platform accepted it.
    async fn perform_global_action(&self, action: PlatformActionId) -> Result<(), InputError>;

    /// Inject one pointer-button, wheel or key event.
    async fn inject(&self, input: DeviceInput) -> Result<(), InputError>;

    /// Release all contacts and tear down the backend.
    async fn shutdown(&self) -> Result<(), InputError>;
}
