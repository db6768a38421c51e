pub mod border;
pub mod buffer;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod hit;
pub mod input;
pub mod layout;
pub mod terminal;
pub mod text;
pub mod types;

pub use border::{draw_border, BorderKind};
pub use buffer::{Buffer, Cell};
pub use config::WindowConfig;
pub use control::{
    Control, ControlContext, ControlHeader, ControlId, CursorState, EventResult, Notification,
    Window,
};
pub use error::ControlError;
pub use event::{Area, Event, Key, Modifiers, MouseButton, Point, WheelDirection};
pub use hit::{find_child_at, find_top_level_at, ChildHit};
pub use input::{InputTranslator, ScreenEvent};
pub use layout::Rect;
pub use terminal::Terminal;
pub use types::*;
