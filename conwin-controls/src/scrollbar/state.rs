//! Scrollbar position and geometry.

/// Layout of a vertical scrollbar of a given height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollbarGeometry {
    /// Whether the first and last rows hold step arrows.
    pub arrows: bool,
    /// First row of the track.
    pub track_start: u16,
    /// Rows between the arrows.
    pub track_len: u16,
    /// Handle offset within the track.
    pub handle_pos: u16,
    pub handle_size: u16,
}

impl ScrollbarGeometry {
    /// Where `row` (scrollbar coordinates) falls.
    pub fn part_at(&self, row: u16) -> ScrollbarPart {
        if self.arrows && row < self.track_start {
            return ScrollbarPart::UpArrow;
        }
        let Some(rel) = row.checked_sub(self.track_start) else {
            return ScrollbarPart::UpArrow;
        };
        if rel >= self.track_len {
            ScrollbarPart::DownArrow
        } else if rel < self.handle_pos {
            ScrollbarPart::TrackAbove
        } else if rel < self.handle_pos + self.handle_size {
            ScrollbarPart::Handle { grab_offset: rel - self.handle_pos }
        } else {
            ScrollbarPart::TrackBelow
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarPart {
    UpArrow,
    TrackAbove,
    Handle { grab_offset: u16 },
    TrackBelow,
    DownArrow,
}

/// Drag in progress on the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarDrag {
    /// Offset within the handle where the user grabbed.
    pub grab_offset: u16,
}

/// Position of a vertical scrollbar: `top` within `0..=max`, with `page`
/// rows shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollbarState {
    pub(super) top: usize,
    pub(super) page: usize,
    pub(super) max: usize,
    pub(super) drag: Option<ScrollbarDrag>,
}

impl ScrollbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Set all three values. `top` is clamped to `max`.
    pub fn set(&mut self, top: usize, page: usize, max: usize) {
        self.max = max;
        self.page = page;
        self.top = top.min(max);
    }

    /// Move to `top` (clamped). Returns true if the position changed.
    pub fn scroll_to(&mut self, top: usize) -> bool {
        let top = top.min(self.max);
        let changed = top != self.top;
        self.top = top;
        changed
    }

    pub fn step(&mut self, down: bool) -> bool {
        match down {
            true => self.scroll_to(self.top.saturating_add(1)),
            false => self.scroll_to(self.top.saturating_sub(1)),
        }
    }

    pub fn page_by(&mut self, down: bool) -> bool {
        let page = self.page.max(1);
        match down {
            true => self.scroll_to(self.top.saturating_add(page)),
            false => self.scroll_to(self.top.saturating_sub(page)),
        }
    }

    /// Layout for a scrollbar `height` rows tall.
    pub fn geometry(&self, height: u16) -> ScrollbarGeometry {
        let arrows = height >= 3;
        let track_start = u16::from(arrows);
        let track_len = if arrows { height - 2 } else { height };

        let total = self.page.saturating_add(self.max);
        let handle_size = if self.max == 0 || total == 0 {
            track_len
        } else {
            let size = (track_len as usize * self.page).div_ceil(total);
            (size as u16).clamp(1.min(track_len), track_len)
        };

        let range = track_len - handle_size;
        let handle_pos = if self.max == 0 || range == 0 {
            0
        } else {
            let pos = (self.top * range as usize * 2 + self.max) / (self.max * 2);
            (pos as u16).min(range)
        };

        ScrollbarGeometry {
            arrows,
            track_start,
            track_len,
            handle_pos,
            handle_size,
        }
    }

    /// Position for the handle grabbed at `grab_offset` sitting under `row`.
    pub fn position_for_row(&self, row: u16, grab_offset: u16, height: u16) -> usize {
        let geometry = self.geometry(height);
        let range = geometry.track_len - geometry.handle_size;
        if range == 0 {
            return 0;
        }
        let rel = row
            .saturating_sub(geometry.track_start)
            .saturating_sub(grab_offset)
            .min(range) as usize;
        (rel * self.max * 2 + range as usize) / (range as usize * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_fills_track_when_nothing_to_scroll() {
        let mut bar = ScrollbarState::new();
        bar.set(0, 4, 0);
        let geometry = bar.geometry(6);
        assert_eq!(geometry.track_len, 4);
        assert_eq!(geometry.handle_size, 4);
        assert_eq!(geometry.handle_pos, 0);
    }

    #[test]
    fn test_handle_reaches_bottom_at_max() {
        let mut bar = ScrollbarState::new();
        bar.set(6, 4, 6);
        let geometry = bar.geometry(10);
        assert_eq!(geometry.track_len, 8);
        // 8 * 4 / 10 rounded up
        assert_eq!(geometry.handle_size, 4);
        assert_eq!(geometry.handle_pos, 4);
    }

    #[test]
    fn test_position_for_row_round_trips_ends() {
        let mut bar = ScrollbarState::new();
        bar.set(0, 4, 6);
        assert_eq!(bar.position_for_row(1, 0, 10), 0);
        assert_eq!(bar.position_for_row(5, 0, 10), 6);
        assert_eq!(bar.position_for_row(9, 0, 10), 6);
    }

    #[test]
    fn test_part_at() {
        let mut bar = ScrollbarState::new();
        bar.set(0, 4, 6);
        let geometry = bar.geometry(10);
        assert_eq!(geometry.part_at(0), ScrollbarPart::UpArrow);
        assert_eq!(
            geometry.part_at(1),
            ScrollbarPart::Handle { grab_offset: 0 }
        );
        assert_eq!(geometry.part_at(6), ScrollbarPart::TrackBelow);
        assert_eq!(geometry.part_at(9), ScrollbarPart::DownArrow);
    }

    #[test]
    fn test_scroll_to_clamps() {
        let mut bar = ScrollbarState::new();
        bar.set(0, 4, 6);
        assert!(bar.scroll_to(100));
        assert_eq!(bar.top(), 6);
        assert!(!bar.step(true));
    }
}
