use crate::control::ControlId;

/// Which part of a control a mouse location falls in.
///
/// Client locations are relative to the client rectangle's origin; non-client
/// locations are relative to the control's full rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Client,
    NonClient,
}

/// A cell position within a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Events delivered to a single control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, delivered to the focused control
    KeyDown { key: Key, modifiers: Modifiers },
    /// Mouse button pressed
    MouseDown {
        area: Area,
        location: Point,
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        area: Area,
        location: Point,
        button: MouseButton,
    },
    /// Second press of the same button at the same cell within the interval
    DoubleClick {
        area: Area,
        location: Point,
        button: MouseButton,
    },
    /// Mouse moved with a button held
    Drag {
        area: Area,
        location: Point,
        button: MouseButton,
    },
    /// Mouse wheel notch
    Wheel {
        area: Area,
        location: Point,
        direction: WheelDirection,
        lines: u16,
    },
    /// Control gained keyboard focus
    GotFocus,
    /// Control lost keyboard focus
    LostFocus,
    /// The control's parent is being destroyed; release resources
    ParentDestroyed,
    /// Activation request forwarded from a child (e.g. double-click)
    Execute { source: ControlId },
    /// A scrollbar bound to this control changed position
    ScrollChanged { scrollbar: ControlId },
}

impl Event {
    /// Area and location of a mouse event.
    pub fn mouse_location(&self) -> Option<(Area, Point)> {
        match self {
            Event::MouseDown { area, location, .. }
            | Event::MouseUp { area, location, .. }
            | Event::DoubleClick { area, location, .. }
            | Event::Drag { area, location, .. }
            | Event::Wheel { area, location, .. } => Some((*area, *location)),
            _ => None,
        }
    }

    /// The same mouse event retargeted to another area and location.
    /// Non-mouse events come back unchanged.
    pub fn relocated(&self, new_area: Area, new_location: Point) -> Event {
        let mut event = self.clone();
        match &mut event {
            Event::MouseDown { area, location, .. }
            | Event::MouseUp { area, location, .. }
            | Event::DoubleClick { area, location, .. }
            | Event::Drag { area, location, .. }
            | Event::Wheel { area, location, .. } => {
                *area = new_area;
                *location = new_location;
            }
            _ => {}
        }
        event
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
///
/// `enhanced` marks keys from the extended keypad; it does not count as a
/// modifier for navigation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub enhanced: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn enhanced() -> Self {
        Self {
            enhanced: true,
            ..Default::default()
        }
    }

    /// No shift, ctrl or alt. The enhanced flag is allowed.
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

// Conversion from crossterm types
impl Key {
    /// Map a terminal key code. Keys with no counterpart (media keys, lone
    /// modifiers, lock keys) map to `None`.
    pub fn from_crossterm(code: crossterm::event::KeyCode) -> Option<Key> {
        use crossterm::event::KeyCode;
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(key)
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            enhanced: false,
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
