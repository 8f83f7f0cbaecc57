//! Input subsystem errors.

use gesture_relay_types::{DeviceInput, PlatformActionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to create virtual device: {0}")]
    VirtualDeviceCreate(String),

    #[error("failed to inject event: {0}")]
    Inject(String),

    #[error("gesture rejected by backend: {0}")]
    Rejected(String),

    #[error("global action {0} not supported by this backend")]
    UnsupportedAction(PlatformActionId),

    #[error("input {0:?} not supported by this backend")]
    UnsupportedInput(DeviceInput),

    #[error("backend not available on this platform")]
    Unavailable,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
