//! Vertical scrollbar control.
//!
//! The scrollbar shows `top` within `0..=max` with a handle sized to `page`.
//! User changes (arrows, track clicks, handle drags) are announced to the
//! bound target control with [`Event::ScrollChanged`]; the target then
//! reads [`ScrollBar::position`]. Programmatic [`ScrollBar::set_position`]
//! never announces anything.

mod events;
mod render;
mod state;

use std::any::Any;

use conwin::{Control, ControlContext, ControlError, ControlId, Event, EventResult, Rect};

pub use render::render_scrollbar;
pub use state::{ScrollbarDrag, ScrollbarGeometry, ScrollbarPart, ScrollbarState};

#[derive(Debug, Default)]
pub struct ScrollBar {
    state: ScrollbarState,
    /// Control told about user-driven position changes.
    target: Option<ControlId>,
}

impl ScrollBar {
    pub fn new(target: Option<ControlId>) -> Self {
        Self {
            state: ScrollbarState::new(),
            target,
        }
    }

    /// Create a scrollbar as a child of the control handling `cx`.
    pub fn create_child(
        cx: &mut ControlContext<'_>,
        rect: Rect,
        target: Option<ControlId>,
    ) -> Result<ControlId, ControlError> {
        let id = cx.create_child(rect, false, Box::new(Self::new(target)))?;
        cx.with_child::<Self, _, _>(id, |bar, bar_cx| bar.paint(bar_cx))?;
        Ok(id)
    }

    pub fn state(&self) -> &ScrollbarState {
        &self.state
    }

    /// Current top value.
    pub fn position(&self) -> usize {
        self.state.top()
    }

    pub fn target(&self) -> Option<ControlId> {
        self.target
    }

    /// Update position, page size and maximum, then repaint.
    pub fn set_position(&mut self, cx: &mut ControlContext<'_>, top: usize, page: usize, max: usize) {
        self.state.set(top, page, max);
        self.paint(cx);
    }

    pub fn reposition(&mut self, cx: &mut ControlContext<'_>, rect: Rect) -> Result<(), ControlError> {
        cx.reposition(rect)?;
        self.paint(cx);
        Ok(())
    }

    pub fn paint(&self, cx: &mut ControlContext<'_>) {
        render_scrollbar(&self.state, cx);
    }
}

impl Control for ScrollBar {
    fn handle_event(&mut self, cx: &mut ControlContext<'_>, event: &Event) -> EventResult {
        let height = cx.client_size().1;
        let was_dragging = self.state.is_dragging();
        let (result, changed) = self.state.handle_event(event, height);

        if changed {
            log::trace!("scrollbar {} moved to {}", cx.id(), self.state.top());
            if let Some(target) = self.target {
                cx.notify(target, Event::ScrollChanged { scrollbar: cx.id() });
            }
        }
        if changed || was_dragging != self.state.is_dragging() {
            self.paint(cx);
        }
        result
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
