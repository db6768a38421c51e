use crate::types::Attr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub attr: Attr,
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            attr: Attr::default(),
            wide_continuation: false,
        }
    }
}

impl Cell {
    pub fn new(char: char) -> Self {
        Self {
            char,
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attr = attr;
        self
    }

    /// The trailing half of a double-width character.
    pub fn continuation(attr: Attr) -> Self {
        Self {
            char: ' ',
            attr,
            wide_continuation: true,
        }
    }
}
