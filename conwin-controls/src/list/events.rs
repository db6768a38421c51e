//! Input handling for the list control.

use conwin::{Area, Event, EventResult, Key, WheelDirection};

use super::state::ListState;

/// What the control must do after the state machine handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub consumed: bool,
    pub repaint: bool,
    /// Run the selection callback.
    pub selection_changed: bool,
    /// Send [`Event::Execute`] to the parent.
    pub execute: bool,
    /// Hit-test the children and hand the event to the one under it.
    pub forward_to_child: bool,
    /// Show (`Some(true)`) or hide the cursor.
    pub cursor: Option<bool>,
}

impl Outcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Consumed and needs a repaint.
    pub fn repaint() -> Self {
        Self {
            consumed: true,
            repaint: true,
            ..Self::default()
        }
    }

    /// Selection changed: consumed, notify, repaint.
    pub fn changed() -> Self {
        Self {
            selection_changed: true,
            ..Self::repaint()
        }
    }

    fn forward() -> Self {
        Self {
            forward_to_child: true,
            ..Self::default()
        }
    }

    pub fn result(&self) -> EventResult {
        self.consumed.into()
    }
}

impl ListState {
    /// Advance the state machine by one event. `visible_rows` is the client
    /// height.
    pub fn handle_event(&mut self, event: &Event, visible_rows: usize) -> Outcome {
        match event {
            Event::KeyDown { key, modifiers } if modifiers.none() => {
                self.handle_key(*key, visible_rows)
            }
            Event::MouseDown {
                area: Area::Client,
                location,
                ..
            } => self.handle_click(location.y as usize),
            Event::DoubleClick {
                area: Area::Client,
                location,
                ..
            } => self.handle_double_click(location.y as usize),
            Event::MouseDown {
                area: Area::NonClient,
                ..
            }
            | Event::MouseUp {
                area: Area::NonClient,
                ..
            }
            | Event::DoubleClick {
                area: Area::NonClient,
                ..
            }
            | Event::Drag {
                area: Area::NonClient,
                ..
            } => Outcome::forward(),
            Event::Wheel {
                direction, lines, ..
            } => {
                let up = *direction == WheelDirection::Up;
                self.scroll_by_wheel(*lines as usize, up, visible_rows);
                Outcome::repaint()
            }
            Event::GotFocus => {
                self.has_focus = true;
                Outcome {
                    cursor: Some(true),
                    ..Outcome::repaint()
                }
            }
            Event::LostFocus => {
                self.has_focus = false;
                let deselected = self.deselect_on_lose_focus && self.clear_activation();
                Outcome {
                    cursor: Some(false),
                    selection_changed: deselected,
                    ..Outcome::repaint()
                }
            }
            _ => Outcome::ignored(),
        }
    }

    fn handle_key(&mut self, key: Key, visible_rows: usize) -> Outcome {
        match key {
            Key::Up => self.step(false, visible_rows),
            Key::Down => self.step(true, visible_rows),
            Key::PageUp => self.page_up(visible_rows),
            Key::PageDown => self.page_down(visible_rows),
            Key::Char(' ') if self.multi_select && self.has_active_item => {
                self.toggle(self.active);
                Outcome::changed()
            }
            _ => Outcome::ignored(),
        }
    }

    /// Activate the first entry when nothing is active. Returns false for an
    /// empty store.
    fn activate_first(&mut self, visible_rows: usize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.active = 0;
        self.has_active_item = true;
        self.ensure_active_visible(visible_rows);
        true
    }

    fn step(&mut self, down: bool, visible_rows: usize) -> Outcome {
        if !self.has_active_item {
            return match self.activate_first(visible_rows) {
                true => Outcome::changed(),
                false => Outcome::ignored(),
            };
        }

        let next = if down {
            Some(self.active + 1).filter(|next| *next < self.items.len())
        } else {
            self.active.checked_sub(1)
        };

        match next {
            Some(next) => {
                self.active = next;
                self.ensure_active_visible(visible_rows);
                Outcome::changed()
            }
            // At either end: nothing changes
            None => Outcome::ignored(),
        }
    }

    fn page_up(&mut self, visible_rows: usize) -> Outcome {
        if !self.has_active_item {
            return match self.activate_first(visible_rows) {
                true => Outcome::changed(),
                false => Outcome::ignored(),
            };
        }

        self.active = if self.active > self.first_visible {
            self.first_visible
        } else {
            self.active.saturating_sub(visible_rows)
        };
        self.ensure_active_visible(visible_rows);
        Outcome::changed()
    }

    fn page_down(&mut self, visible_rows: usize) -> Outcome {
        if !self.has_active_item {
            return match self.activate_first(visible_rows) {
                true => Outcome::changed(),
                false => Outcome::ignored(),
            };
        }

        let count = self.items.len();
        let last_row = (self.first_visible + visible_rows).checked_sub(1);
        self.active = match last_row {
            Some(last) if self.active < last && last < count => last,
            _ if self.active + visible_rows < count => self.active + visible_rows,
            _ => count - 1,
        };
        self.ensure_active_visible(visible_rows);
        Outcome::changed()
    }

    fn handle_click(&mut self, row: usize) -> Outcome {
        let index = self.first_visible + row;
        if index >= self.items.len() {
            return Outcome::ignored();
        }

        // Clicking the active row again flips its flag. `active` holds its
        // last value even when nothing is active, so a first click on row 0
        // toggles too.
        if self.active == index {
            self.toggle(index);
        }
        self.active = index;
        self.has_active_item = true;
        Outcome::changed()
    }

    fn handle_double_click(&mut self, row: usize) -> Outcome {
        let index = self.first_visible + row;
        if index >= self.items.len() {
            return Outcome::ignored();
        }

        self.active = index;
        self.has_active_item = true;
        self.toggle(index);
        Outcome {
            execute: !self.multi_select,
            ..Outcome::changed()
        }
    }
}
