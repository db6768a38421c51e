//! Translation of raw terminal input into screen-level events.

use std::time::{Duration, Instant};

use crossterm::event::{Event as CrosstermEvent, KeyEventKind, KeyEventState, MouseEventKind};

use crate::event::{Key, Modifiers, MouseButton, WheelDirection};

/// Input in screen coordinates, before it is routed to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Key { key: Key, modifiers: Modifiers },
    MouseDown { x: u16, y: u16, button: MouseButton },
    MouseUp { x: u16, y: u16, button: MouseButton },
    DoubleClick { x: u16, y: u16, button: MouseButton },
    Drag { x: u16, y: u16, button: MouseButton },
    Wheel { x: u16, y: u16, direction: WheelDirection },
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy)]
struct LastClick {
    at: Instant,
    x: u16,
    y: u16,
    button: MouseButton,
}

/// Converts crossterm events, synthesizing double-clicks from two presses
/// of the same button on the same cell within the configured interval.
#[derive(Debug)]
pub struct InputTranslator {
    double_click_interval: Duration,
    last_click: Option<LastClick>,
}

impl InputTranslator {
    pub fn new(double_click_interval: Duration) -> Self {
        Self {
            double_click_interval,
            last_click: None,
        }
    }

    /// Translate one event observed at `now`. Returns `None` for events with
    /// no screen-level meaning (key releases, plain mouse moves, paste...).
    pub fn translate(&mut self, event: &CrosstermEvent, now: Instant) -> Option<ScreenEvent> {
        match event {
            CrosstermEvent::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return None;
                }
                let mut modifiers: Modifiers = key.modifiers.into();
                modifiers.enhanced = key.state.contains(KeyEventState::KEYPAD);
                Some(ScreenEvent::Key {
                    key: Key::from_crossterm(key.code)?,
                    modifiers,
                })
            }
            CrosstermEvent::Mouse(mouse) => {
                let (x, y) = (mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(button) => Some(self.press(x, y, button.into(), now)),
                    MouseEventKind::Up(button) => Some(ScreenEvent::MouseUp {
                        x,
                        y,
                        button: button.into(),
                    }),
                    MouseEventKind::Drag(button) => Some(ScreenEvent::Drag {
                        x,
                        y,
                        button: button.into(),
                    }),
                    MouseEventKind::ScrollUp => Some(ScreenEvent::Wheel {
                        x,
                        y,
                        direction: WheelDirection::Up,
                    }),
                    MouseEventKind::ScrollDown => Some(ScreenEvent::Wheel {
                        x,
                        y,
                        direction: WheelDirection::Down,
                    }),
                    _ => None,
                }
            }
            CrosstermEvent::Resize(width, height) => Some(ScreenEvent::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }

    fn press(&mut self, x: u16, y: u16, button: MouseButton, now: Instant) -> ScreenEvent {
        let is_double = self.last_click.is_some_and(|last| {
            last.button == button
                && last.x == x
                && last.y == y
                && now.saturating_duration_since(last.at) <= self.double_click_interval
        });

        if is_double {
            // A third press starts a new sequence rather than another double
            self.last_click = None;
            ScreenEvent::DoubleClick { x, y, button }
        } else {
            self.last_click = Some(LastClick {
                at: now,
                x,
                y,
                button,
            });
            ScreenEvent::MouseDown { x, y, button }
        }
    }
}
