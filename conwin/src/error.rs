use thiserror::Error;

use crate::control::ControlId;
use crate::layout::Rect;

/// Errors reported by the control tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// The handle does not name a live control.
    #[error("no control with id {0}")]
    NoSuchControl(ControlId),

    /// The control exists but is not of the requested type.
    #[error("control {id} is not a {expected}")]
    WrongKind {
        id: ControlId,
        expected: &'static str,
    },

    /// The control is currently handling an event further up the stack.
    #[error("control {0} is busy handling an event")]
    Busy(ControlId),

    /// The rectangle is empty or does not fit inside the parent.
    #[error("invalid control geometry {0:?}")]
    InvalidGeometry(Rect),
}
