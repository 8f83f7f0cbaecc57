//! Gesture submission and completion tracking.
//!
//! The engine hands each gesture to the [`GestureBackend`] together with a
//! one-shot [`GestureCallback`] and returns a [`GestureHandle`] right away.
//! The handle resolves to exactly one [`GestureOutcome`]: whatever the
//! backend reports first, or `Cancelled` if the callback is dropped or the
//! capability detaches while the gesture is in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gesture_relay_input::{GestureBackend, GestureCallback, GestureId};
use gesture_relay_types::{DeviceInput, Gesture, GestureOutcome, PlatformActionId};
use tokio::sync::{oneshot, watch};
use tracing::{debug, warn};

use crate::availability::{Attachment, ServiceAvailability};
use crate::error::EngineError;

/// Submits gestures and global actions while the capability is attached.
pub struct GestureExecutionEngine {
    backend: Arc<dyn GestureBackend>,
    availability: ServiceAvailability,
    next_id: AtomicU64,
}

impl GestureExecutionEngine {
    pub fn new(backend: Arc<dyn GestureBackend>, availability: ServiceAvailability) -> Self {
        Self {
            backend,
            availability,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn availability(&self) -> &ServiceAvailability {
        &self.availability
    }

    /// Submit `gesture` without waiting for it to finish.
    ///
    /// Returns `None` without touching the backend when the capability is
    /// detached, and `None` when the backend refuses the gesture.
    pub async fn dispatch(&self, gesture: Gesture) -> Option<GestureHandle> {
        let mut attachment = self.availability.subscribe();
        let Attachment {
            available,
            generation,
        } = *attachment.borrow_and_update();
        if !available {
            debug!("capability detached, gesture not dispatched");
            return None;
        }

        let id = GestureId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let strokes = gesture.stroke_count();
        let duration_ms = gesture.total_duration_ms();
        let (callback, rx) = GestureCallback::new(id);

        match self.backend.dispatch_gesture(gesture, callback).await {
            Ok(()) => {
                debug!(%id, strokes, duration_ms, generation, "gesture dispatched");
                Some(GestureHandle {
                    id,
                    rx,
                    attachment,
                    generation,
                })
            }
            Err(e) => {
                warn!(%id, error = %e, "backend refused gesture");
                None
            }
        }
    }

    /// Perform a global action. Returns whether the platform accepted it.
    pub async fn dispatch_global_action(&self, action: PlatformActionId) -> bool {
        if !self.availability.is_available() {
            debug!(%action, "capability detached, action not performed");
            return false;
        }
        match self.backend.perform_global_action(action).await {
            Ok(()) => {
                debug!(%action, "global action performed");
                true
            }
            Err(e) => {
                warn!(%action, error = %e, "global action rejected");
                false
            }
        }
    }

    /// Inject `inputs` in order, stopping at the first the backend refuses.
    /// Returns whether all of them were injected.
    pub async fn dispatch_input(&self, inputs: &[DeviceInput]) -> bool {
        if !self.availability.is_available() {
            debug!(count = inputs.len(), "capability detached, input not injected");
            return false;
        }
        for input in inputs {
            if let Err(e) = self.backend.inject(*input).await {
                warn!(?input, error = %e, "input rejected");
                return false;
            }
        }
        true
    }

    /// Tear down the backend.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.backend.shutdown().await?;
        Ok(())
    }
}

/// Pending result of one dispatched gesture.
#[derive(Debug)]
pub struct GestureHandle {
    id: GestureId,
    rx: oneshot::Receiver<GestureOutcome>,
    attachment: watch::Receiver<Attachment>,
    generation: u64,
}

impl GestureHandle {
    pub fn id(&self) -> GestureId {
        self.id
    }

    /// Wait for the gesture to finish.
    ///
    /// A backend report wins over a detach observed at the same time.
    pub async fn outcome(self) -> GestureOutcome {
        let Self {
            id,
            rx,
            mut attachment,
            generation,
        } = self;

        let detached = async move {
            let _ = attachment
                .wait_for(|state| !state.available || state.generation != generation)
                .await;
        };

        tokio::select! {
            biased;
            result = rx => match result {
                Ok(outcome) => {
                    debug!(%id, %outcome, "gesture finished");
                    outcome
                }
                Err(_) => {
                    debug!(%id, "completion callback dropped");
                    GestureOutcome::Cancelled
                }
            },
            () = detached => {
                debug!(%id, "capability detached while gesture in flight");
                GestureOutcome::Cancelled
            }
        }
    }
}
