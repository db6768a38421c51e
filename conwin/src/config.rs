//! Window configuration.

use std::time::Duration;

use crate::types::{Attr, Color};

/// Host-wide settings shared by every control in a window.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Attributes new controls start with.
    pub default_attr: Attr,

    /// Cursor height as a percentage of the cell when a control shows it.
    pub cursor_size_percent: u8,

    /// Maximum gap between two presses that still counts as a double-click.
    pub double_click_interval: Duration,

    /// Rows scrolled per mouse wheel notch.
    pub wheel_lines: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_attr: Attr::new(Color::Black, Color::LightGray),
            cursor_size_percent: 20,
            double_click_interval: Duration::from_millis(500),
            wheel_lines: 3,
        }
    }
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attributes new controls start with.
    pub fn default_attr(mut self, attr: Attr) -> Self {
        self.default_attr = attr;
        self
    }

    /// Set the visible cursor size (clamped to 1..=100).
    pub fn cursor_size_percent(mut self, percent: u8) -> Self {
        self.cursor_size_percent = percent.clamp(1, 100);
        self
    }

    /// Set the double-click interval.
    pub fn double_click_interval(mut self, interval: Duration) -> Self {
        self.double_click_interval = interval;
        self
    }

    /// Set rows per wheel notch (at least one).
    pub fn wheel_lines(mut self, lines: u16) -> Self {
        self.wheel_lines = lines.max(1);
        self
    }
}
