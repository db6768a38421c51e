/// One of the sixteen console colors.
///
/// The discriminant is the console palette index, so the low three bits are
/// the blue/green/red components and bit 3 is intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Self {
        match index & 0x0f {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Brown,
            7 => Color::LightGray,
            8 => Color::DarkGray,
            9 => Color::LightBlue,
            10 => Color::LightGreen,
            11 => Color::LightCyan,
            12 => Color::LightRed,
            13 => Color::LightMagenta,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// Foreground/background pair applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attr {
    pub fg: Color,
    pub bg: Color,
}

impl Default for Attr {
    fn default() -> Self {
        Self {
            fg: Color::LightGray,
            bg: Color::Black,
        }
    }
}

impl Attr {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Swap foreground and background, used for highlighted rows.
    pub const fn swapped(self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
        }
    }

    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Pack into the classic console byte: background in the high nibble.
    pub const fn to_byte(self) -> u8 {
        (self.bg.index() << 4) | self.fg.index()
    }

    pub const fn from_byte(byte: u8) -> Self {
        Self {
            fg: Color::from_index(byte & 0x0f),
            bg: Color::from_index(byte >> 4),
        }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        use crossterm::style::Color as CtColor;
        match color {
            Color::Black => CtColor::Black,
            Color::Blue => CtColor::DarkBlue,
            Color::Green => CtColor::DarkGreen,
            Color::Cyan => CtColor::DarkCyan,
            Color::Red => CtColor::DarkRed,
            Color::Magenta => CtColor::DarkMagenta,
            Color::Brown => CtColor::DarkYellow,
            Color::LightGray => CtColor::Grey,
            Color::DarkGray => CtColor::DarkGrey,
            Color::LightBlue => CtColor::Blue,
            Color::LightGreen => CtColor::Green,
            Color::LightCyan => CtColor::Cyan,
            Color::LightRed => CtColor::Red,
            Color::LightMagenta => CtColor::Magenta,
            Color::Yellow => CtColor::Yellow,
            Color::White => CtColor::White,
        }
    }
}
