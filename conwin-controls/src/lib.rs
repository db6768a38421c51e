pub mod error;
pub mod list;
pub mod scrollbar;

pub use error::ListError;
pub use list::{ItemStore, ListControl, ListHandle, ListItem, ListState, ListStyle, Outcome, RowLayout};
pub use scrollbar::{ScrollBar, ScrollbarState};
