//! Attachment state of the underlying input capability.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Snapshot of the capability's attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attachment {
    pub available: bool,
    /// Incremented on every attach; a gesture belongs to one generation.
    pub generation: u64,
}

/// Shared availability flag with explicit attach/detach lifecycle.
///
/// Clones observe the same flag. Subscribers are woken on every change so
/// in-flight gestures can notice a detach.
#[derive(Debug, Clone)]
pub struct ServiceAvailability {
    tx: Arc<watch::Sender<Attachment>>,
}

impl Default for ServiceAvailability {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceAvailability {
    /// Create a detached flag.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Attachment::default());
        Self { tx: Arc::new(tx) }
    }

    /// Mark the capability attached and start a new generation.
    pub fn attach(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.available = true;
            state.generation += 1;
            generation = state.generation;
        });
        info!(generation, "input capability attached");
        generation
    }

    /// Mark the capability detached. Returns whether it was attached.
    pub fn detach(&self) -> bool {
        let mut was_available = false;
        self.tx.send_modify(|state| {
            was_available = state.available;
            state.available = false;
        });
        if was_available {
            info!("input capability detached");
        }
        was_available
    }

    pub fn is_available(&self) -> bool {
        self.tx.borrow().available
    }

    pub fn current(&self) -> Attachment {
        *self.tx.borrow()
    }

    /// Receiver notified on every attach and detach.
    pub fn subscribe(&self) -> watch::Receiver<Attachment> {
        self.tx.subscribe()
    }
}
