//! The control tree.
//!
//! A [`Window`] owns every control in an arena indexed by [`ControlId`].
//! Each node pairs a host-owned [`ControlHeader`] (geometry, attributes,
//! links, cursor, cell surface) with a boxed [`Control`] payload that
//! implements the control's behavior.

mod context;
mod header;
mod window;

use std::any::Any;
use std::fmt;

pub use context::ControlContext;
pub use header::{ControlHeader, CursorState};
pub use window::{Notification, Window};

use crate::event::Event;

/// Handle to a control in a [`Window`].
///
/// Ids are never reused within a window, so a stale handle simply fails
/// to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(usize);

impl ControlId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored; the host may continue default processing.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<bool> for EventResult {
    fn from(consumed: bool) -> Self {
        if consumed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

/// Behavior of a control kind.
///
/// The window takes the payload out of its node while `handle_event` runs,
/// so the control may freely use the context (including its children)
/// without aliasing itself.
pub trait Control: Any + fmt::Debug {
    fn handle_event(&mut self, cx: &mut ControlContext<'_>, event: &Event) -> EventResult;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
