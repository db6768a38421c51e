use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::control::Window;
use crate::text::char_width;
use crate::types::Attr;

/// Raw-mode alternate-screen terminal that flushes a [`Window`] by diffing
/// the composed screen against the previous frame.
pub struct Terminal {
    stdout: io::Stdout,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            stdout,
            previous_buffer: unpainted(width, height),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                // Block until event
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Compose the window and write the cells that changed since last frame.
    pub fn render(&mut self, window: &mut Window) -> io::Result<()> {
        let screen = window.compose();

        if screen.width() != self.previous_buffer.width()
            || screen.height() != self.previous_buffer.height()
        {
            self.previous_buffer = unpainted(screen.width(), screen.height());
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        Self::flush_diff(&mut self.stdout, screen, &self.previous_buffer)?;
        self.previous_buffer = screen.clone();

        match window.cursor_position() {
            Some((x, y, _)) => queue!(self.stdout, cursor::MoveTo(x, y), cursor::Show)?,
            None => queue!(self.stdout, cursor::Hide)?,
        }
        self.stdout.flush()
    }

    fn flush_diff(stdout: &mut io::Stdout, current: &Buffer, previous: &Buffer) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_attr: Option<Attr> = None;

        // Reset to known state at start
        queue!(stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in current.diff(previous) {
            // Skip wide character continuation cells - the wide char already occupies this space
            if cell.wide_continuation {
                continue;
            }

            // Move cursor if not sequential (accounting for wide chars)
            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(stdout, cursor::MoveTo(x, y))?;
            }

            if last_attr != Some(cell.attr) {
                queue!(
                    stdout,
                    SetForegroundColor(cell.attr.fg.into()),
                    SetBackgroundColor(cell.attr.bg.into())
                )?;
                last_attr = Some(cell.attr);
            }

            write!(stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        // Reset at end
        queue!(stdout, SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// A frame that differs from every real cell, forcing a full repaint.
fn unpainted(width: u16, height: u16) -> Buffer {
    Buffer::filled(width, height, Cell::new('\0'))
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
