use std::collections::TryReserveError;

use conwin::ControlError;
use thiserror::Error;

/// Errors reported by list operations. A failed operation leaves the list
/// exactly as it was.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("no item is active")]
    NoActiveItem,

    #[error("index {index} out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("a selection callback is already registered")]
    CallbackAlreadyRegistered,

    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    #[error(transparent)]
    Control(#[from] ControlError),
}
