//! List state: item store, viewport and selection model.
//!
//! Everything here is pure; the control in `mod.rs` owns a `ListState`
//! and turns its results into painting and notifications. The number of
//! visible rows is passed in by the caller since it belongs to the host's
//! geometry, not to the list.

use std::collections::TryReserveError;

use super::item::{ItemStore, ListItem};
use super::ListStyle;
use crate::error::ListError;

#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// The entries shown by the list.
    pub(super) items: ItemStore,
    /// Index of the entry on the top row.
    pub(super) first_visible: usize,
    /// Highlighted entry. Only meaningful while `has_active_item` is set,
    /// and kept (not reset) when activation is cleared.
    pub(super) active: usize,
    pub(super) has_active_item: bool,
    pub(super) multi_select: bool,
    pub(super) deselect_on_lose_focus: bool,
    pub(super) has_focus: bool,
}

impl ListState {
    pub fn new(style: ListStyle) -> Self {
        Self {
            multi_select: style.multi_select,
            deselect_on_lose_focus: style.deselect_on_lose_focus,
            ..Default::default()
        }
    }

    /// Build a state holding `texts`, mainly for driving the state machine
    /// without a window.
    pub fn with_items<S: AsRef<str>>(style: ListStyle, texts: &[S]) -> Result<Self, ListError> {
        let mut state = Self::new(style);
        state.items.append_texts(texts)?;
        Ok(state)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// The active index, if an item is active.
    pub fn active(&self) -> Option<usize> {
        self.has_active_item.then_some(self.active)
    }

    pub fn has_active_item(&self) -> bool {
        self.has_active_item
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn deselects_on_lose_focus(&self) -> bool {
        self.deselect_on_lose_focus
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn item(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    /// Single-select: the active entry. Multi-select: the entry's own flag.
    pub fn is_selected(&self, index: usize) -> bool {
        if self.multi_select {
            self.items.get(index).is_some_and(|item| item.selected)
        } else {
            self.has_active_item && index == self.active && index < self.items.len()
        }
    }

    /// Every selected index, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        if self.multi_select {
            self.items.flagged_indices()
        } else {
            self.active().into_iter().collect()
        }
    }

    /// Row of the cursor within the client area: the active row when it is
    /// in view, else row 0.
    pub fn cursor_row(&self, visible_rows: usize) -> usize {
        match self.active() {
            Some(active) => active
                .checked_sub(self.first_visible)
                .filter(|row| *row < visible_rows)
                .unwrap_or(0),
            None => 0,
        }
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    /// Largest `first_visible` that still fills the view.
    fn max_first_visible(&self, visible_rows: usize) -> usize {
        self.items.len().saturating_sub(visible_rows)
    }

    /// Scroll so the active entry is on screen. No-op without one.
    pub fn ensure_active_visible(&mut self, visible_rows: usize) {
        if !self.has_active_item {
            return;
        }
        let display = visible_rows.min(self.items.len());

        if self.active < self.first_visible {
            self.first_visible = self.active;
        }
        if self.active >= self.first_visible + display {
            self.first_visible = (self.active + 1).saturating_sub(display);
        }
    }

    /// Pan the view by wheel notches. Leaves `active` where it is.
    pub fn scroll_by_wheel(&mut self, lines: usize, up: bool, visible_rows: usize) {
        if up {
            self.first_visible = self.first_visible.saturating_sub(lines);
        } else if self.first_visible + lines + visible_rows > self.items.len() {
            self.first_visible = self.max_first_visible(visible_rows);
        } else {
            self.first_visible += lines;
        }
    }

    /// Apply a top row reported by the scrollbar. Leaves `active` where it
    /// is, so the highlight may end up out of view.
    pub fn on_scrollbar_position_changed(&mut self, raw: usize, visible_rows: usize) {
        if raw.saturating_add(visible_rows) > self.items.len() {
            self.first_visible = self.max_first_visible(visible_rows);
        } else if raw < self.items.len() {
            self.first_visible = raw;
        }
    }

    /// Re-establish the viewport after the number of rows changed.
    pub fn fit_viewport(&mut self, visible_rows: usize) {
        self.first_visible = self.first_visible.min(self.max_first_visible(visible_rows));
        self.ensure_active_visible(visible_rows);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Make `index` the active entry and scroll it into view.
    pub fn set_active(&mut self, index: usize, visible_rows: usize) -> Result<(), ListError> {
        let count = self.items.len();
        if index >= count {
            return Err(ListError::IndexOutOfRange { index, count });
        }
        self.active = index;
        self.has_active_item = true;
        self.ensure_active_visible(visible_rows);
        Ok(())
    }

    /// Flip an entry's flag (multi-select lists only).
    pub fn toggle(&mut self, index: usize) -> bool {
        self.multi_select && self.items.toggle(index).is_some()
    }

    /// Forget the active entry. Returns true if one was active.
    pub fn clear_activation(&mut self) -> bool {
        std::mem::replace(&mut self.has_active_item, false)
    }

    // -------------------------------------------------------------------------
    // Item store
    // -------------------------------------------------------------------------

    pub fn append_texts<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        visible_rows: usize,
    ) -> Result<(), TryReserveError> {
        self.items.append_texts(texts)?;
        self.ensure_active_visible(visible_rows);
        Ok(())
    }

    pub fn append_store(&mut self, store: ItemStore, visible_rows: usize) -> Result<(), TryReserveError> {
        self.items.append_store(store)?;
        self.ensure_active_visible(visible_rows);
        Ok(())
    }

    /// Copy an entry's text into `out`, replacing its contents. `out` is
    /// untouched on failure.
    pub fn item_text(&self, index: usize, out: &mut String) -> Result<(), ListError> {
        let count = self.items.len();
        let item = self
            .items
            .get(index)
            .ok_or(ListError::IndexOutOfRange { index, count })?;
        out.try_reserve(item.text.len().saturating_sub(out.len()))?;
        out.clear();
        out.push_str(&item.text);
        Ok(())
    }

    /// Empty the store and reset the viewport. Returns true if an entry was
    /// active.
    pub fn clear_all(&mut self) -> bool {
        self.items.cleanup();
        self.first_visible = 0;
        self.active = 0;
        self.clear_activation()
    }

    /// Release the store at teardown.
    pub(super) fn release(&mut self) {
        self.items.cleanup();
        self.has_active_item = false;
        self.first_visible = 0;
    }
}
