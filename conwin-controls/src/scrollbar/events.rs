//! Mouse handling for the scrollbar.

use conwin::{Event, EventResult, MouseButton};

use super::state::{ScrollbarDrag, ScrollbarPart, ScrollbarState};

impl ScrollbarState {
    /// Handle a mouse event on a scrollbar `height` rows tall. Returns the
    /// result and whether `top` changed.
    pub fn handle_event(&mut self, event: &Event, height: u16) -> (EventResult, bool) {
        match event {
            Event::MouseDown {
                location,
                button: MouseButton::Left,
                ..
            }
            | Event::DoubleClick {
                location,
                button: MouseButton::Left,
                ..
            } => {
                let changed = match self.geometry(height).part_at(location.y) {
                    ScrollbarPart::UpArrow => self.step(false),
                    ScrollbarPart::DownArrow => self.step(true),
                    ScrollbarPart::TrackAbove => self.page_by(false),
                    ScrollbarPart::TrackBelow => self.page_by(true),
                    ScrollbarPart::Handle { grab_offset } => {
                        self.drag = Some(ScrollbarDrag { grab_offset });
                        false
                    }
                };
                (EventResult::Consumed, changed)
            }
            Event::Drag { location, .. } => match self.drag {
                Some(drag) => {
                    let top = self.position_for_row(location.y, drag.grab_offset, height);
                    (EventResult::Consumed, self.scroll_to(top))
                }
                None => (EventResult::Ignored, false),
            },
            Event::MouseUp { .. } => match self.drag.take() {
                Some(_) => (EventResult::Consumed, false),
                None => (EventResult::Ignored, false),
            },
            _ => (EventResult::Ignored, false),
        }
    }
}
