mod color;

pub use color::{Attr, Color};
