//! Mock gesture backend for testing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use gesture_relay_types::{DeviceInput, Gesture, GestureOutcome, PlatformActionId};
use tracing::debug;

use crate::error::InputError;
use crate::{GestureBackend, GestureCallback, GestureId};

/// How `MockBackend` resolves a gesture it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCompletion {
    /// Report `Completed` as soon as the gesture is submitted.
    Complete,
    /// Report `Cancelled` as soon as the gesture is submitted.
    Cancel,
    /// Report `Completed` after the gesture's total duration has elapsed.
    Timed,
    /// Keep the callback until the test resolves it through the handle.
    Hold,
    /// Refuse the gesture at submission.
    Reject,
}

/// Recorded gesture submission for test observation.
#[derive(Debug, Clone)]
pub struct DispatchedGesture {
    pub id: GestureId,
    pub gesture: Gesture,
}

#[derive(Debug)]
struct MockBackendState {
    completion: MockCompletion,
    reject_actions: bool,
    dispatched: Vec<DispatchedGesture>,
    actions: Vec<PlatformActionId>,
    injected: Vec<DeviceInput>,
    pending: Vec<GestureCallback>,
    shutdown: bool,
}

impl Default for MockBackendState {
    fn default() -> Self {
        Self {
            completion: MockCompletion::Complete,
            reject_actions: false,
            dispatched: Vec::new(),
            actions: Vec::new(),
            injected: Vec::new(),
            pending: Vec::new(),
            shutdown: false,
        }
    }
}

fn lock(state: &Mutex<MockBackendState>) -> MutexGuard<'_, MockBackendState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock gesture backend: records everything it is asked to do.
pub struct MockBackend {
    state: Arc<Mutex<MockBackendState>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a backend that completes every gesture immediately.
    pub fn new() -> Self {
        Self::with_completion(MockCompletion::Complete)
    }

    pub fn with_completion(completion: MockCompletion) -> Self {
        let state = MockBackendState {
            completion,
            ..MockBackendState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Get a clonable handle for observing and steering the backend from tests.
    pub fn handle(&self) -> MockBackendHandle {
        MockBackendHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for `MockBackend`.
#[derive(Clone)]
pub struct MockBackendHandle {
    state: Arc<Mutex<MockBackendState>>,
}

impl MockBackendHandle {
    /// Snapshot of all accepted or rejected gesture submissions.
    pub fn dispatched(&self) -> Vec<DispatchedGesture> {
        lock(&self.state).dispatched.clone()
    }

    pub fn dispatch_count(&self) -> usize {
        lock(&self.state).dispatched.len()
    }

    /// Snapshot of all global actions performed.
    pub fn actions(&self) -> Vec<PlatformActionId> {
        lock(&self.state).actions.clone()
    }

    /// Snapshot of all pointer and keyboard events injected.
    pub fn injected(&self) -> Vec<DeviceInput> {
        lock(&self.state).injected.clone()
    }

    /// Number of held gestures not yet resolved.
    pub fn pending_count(&self) -> usize {
        lock(&self.state).pending.len()
    }

    /// Ids of held gestures, in submission order.
    pub fn pending_ids(&self) -> Vec<GestureId> {
        lock(&self.state).pending.iter().map(GestureCallback::id).collect()
    }

    pub fn set_completion(&self, completion: MockCompletion) {
        lock(&self.state).completion = completion;
    }

    /// Refuse global actions and injected input from now on.
    pub fn set_reject_actions(&self, reject: bool) {
        lock(&self.state).reject_actions = reject;
    }

    /// Resolve one held gesture. Returns `false` if `id` is not held.
    pub fn resolve(&self, id: GestureId, outcome: GestureOutcome) -> bool {
        let callback = {
            let mut state = lock(&self.state);
            let Some(index) = state.pending.iter().position(|cb| cb.id() == id) else {
                return false;
            };
            state.pending.remove(index)
        };
        callback.resolve(outcome);
        true
    }

    /// Resolve every held gesture with `outcome`.
    pub fn resolve_all(&self, outcome: GestureOutcome) -> usize {
        let pending: Vec<_> = lock(&self.state).pending.drain(..).collect();
        let count = pending.len();
        for callback in pending {
            callback.resolve(outcome);
        }
        count
    }

    /// Drop every held callback without resolving it.
    pub fn drop_pending(&self) -> usize {
        let pending: Vec<_> = lock(&self.state).pending.drain(..).collect();
        pending.len()
    }

    /// Check if shutdown was called.
    pub fn is_shutdown(&self) -> bool {
        lock(&self.state).shutdown
    }
}

#[async_trait]
impl GestureBackend for MockBackend {
    async fn dispatch_gesture(
        &self,
        gesture: Gesture,
        callback: GestureCallback,
    ) -> Result<(), InputError> {
        let id = callback.id();
        let total = gesture.total_duration_ms();
        let completion = {
            let mut state = lock(&self.state);
            state.dispatched.push(DispatchedGesture { id, gesture });
            state.completion
        };
        debug!(%id, ?completion, "mock gesture submitted");

        match completion {
            MockCompletion::Complete => {
                callback.complete();
            }
            MockCompletion::Cancel => {
                callback.cancel();
            }
            MockCompletion::Timed => {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(total)).await;
                    if callback.is_abandoned() {
                        debug!(%id, "nobody waiting for timed gesture");
                    } else {
                        callback.complete();
                    }
                });
            }
            MockCompletion::Hold => lock(&self.state).pending.push(callback),
            MockCompletion::Reject => {
                return Err(InputError::Rejected("mock rejection".to_string()));
            }
        }
        Ok(())
    }

    async fn perform_global_action(&self, action: PlatformActionId) -> Result<(), InputError> {
        let mut state = lock(&self.state);
        if state.reject_actions {
            return Err(InputError::UnsupportedAction(action));
        }
        state.actions.push(action);
        Ok(())
    }

    async fn inject(&self, input: DeviceInput) -> Result<(), InputError> {
        let mut state = lock(&self.state);
        if state.reject_actions {
            return Err(InputError::UnsupportedInput(input));
        }
        state.injected.push(input);
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), InputError> {
        let pending: Vec<_> = {
            let mut state = lock(&self.state);
            state.shutdown = true;
            state.pending.drain(..).collect()
        };
        for callback in pending {
            callback.cancel();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gesture_relay_types::{Key, Point, Stroke, StrokePath};

    use super::*;

    fn tap_gesture() -> Gesture {
        Gesture::single(Stroke::new(StrokePath::Point(Point::new(5.0, 5.0)), 0, 10).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn complete_mode_resolves_immediately() {
        let backend = MockBackend::new();
        let handle = backend.handle();
        let (callback, rx) = GestureCallback::new(GestureId(1));
        backend.dispatch_gesture(tap_gesture(), callback).await.unwrap();
        assert_eq!(rx.await.unwrap(), GestureOutcome::Completed);
        assert_eq!(handle.dispatch_count(), 1);
    }

    #[tokio::test]
    async fn hold_mode_waits_for_handle() {
        let backend = MockBackend::with_completion(MockCompletion::Hold);
        let handle = backend.handle();
        let (callback, rx) = GestureCallback::new(GestureId(3));
        backend.dispatch_gesture(tap_gesture(), callback).await.unwrap();
        assert_eq!(handle.pending_ids(), vec![GestureId(3)]);
        assert!(handle.resolve(GestureId(3), GestureOutcome::Cancelled));
        assert!(!handle.resolve(GestureId(3), GestureOutcome::Completed));
        assert_eq!(rx.await.unwrap(), GestureOutcome::Cancelled);
    }

    #[tokio::test]
    async fn reject_mode_returns_error() {
        let backend = MockBackend::with_completion(MockCompletion::Reject);
        let (callback, _rx) = GestureCallback::new(GestureId(1));
        let result = backend.dispatch_gesture(tap_gesture(), callback).await;
        assert!(matches!(result, Err(InputError::Rejected(_))));
    }

    #[tokio::test]
    async fn shutdown_cancels_held_gestures() {
        let backend = MockBackend::with_completion(MockCompletion::Hold);
        let handle = backend.handle();
        let (callback, rx) = GestureCallback::new(GestureId(9));
        backend.dispatch_gesture(tap_gesture(), callback).await.unwrap();
        backend.shutdown().await.unwrap();
        assert!(handle.is_shutdown());
        assert_eq!(rx.await.unwrap(), GestureOutcome::Cancelled);
    }

    #[tokio::test]
    async fn actions_are_recorded_or_rejected() {
        let backend = MockBackend::new();
        let handle = backend.handle();
        backend
            .perform_global_action(PlatformActionId::HOME)
            .await
            .unwrap();
        handle.set_reject_actions(true);
        assert!(backend
            .perform_global_action(PlatformActionId::BACK)
            .await
            .is_err());
        assert_eq!(handle.actions(), vec![PlatformActionId::HOME]);
    }

    #[tokio::test]
    async fn injected_input_is_recorded_in_order() {
        let backend = MockBackend::new();
        let handle = backend.handle();
        for input in DeviceInput::key_press(Key::KeyA) {
            backend.inject(input).await.unwrap();
        }
        backend
            .inject(DeviceInput::Scroll { dx: 0, dy: 2 })
            .await
            .unwrap();
        let injected = handle.injected();
        assert_eq!(injected.len(), 3);
        assert_eq!(injected[2], DeviceInput::Scroll { dx: 0, dy: 2 });

        handle.set_reject_actions(true);
        let result = backend.inject(DeviceInput::Scroll { dx: 1, dy: 0 }).await;
        assert!(matches!(result, Err(InputError::UnsupportedInput(_))));
        assert_eq!(handle.injected().len(), 3);
    }
}
