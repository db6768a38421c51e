//! Item store backing a list control.

use std::collections::TryReserveError;

/// One displayable entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    /// Independent selection flag, only meaningful in multi-select lists.
    pub selected: bool,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected: false,
        }
    }
}

/// Ordered collection of list entries.
///
/// Bulk appends reserve their full capacity before touching the store, so a
/// failed append leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<ListItem>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from display strings, none selected.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Result<Self, TryReserveError> {
        let mut store = Self::new();
        store.append_texts(texts)?;
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListItem> {
        self.items.iter()
    }

    /// Append one unselected entry per string.
    pub fn append_texts<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<(), TryReserveError> {
        // Copy every string first so a failure midway leaves the store alone
        let mut staged = Vec::new();
        staged.try_reserve_exact(texts.len())?;
        for text in texts {
            let text = text.as_ref();
            let mut owned = String::new();
            owned.try_reserve_exact(text.len())?;
            owned.push_str(text);
            staged.push(ListItem {
                text: owned,
                selected: false,
            });
        }

        self.items.try_reserve(staged.len())?;
        self.items.append(&mut staged);
        Ok(())
    }

    /// Move every entry of `other` (flags included) onto the end.
    pub fn append_store(&mut self, other: ItemStore) -> Result<(), TryReserveError> {
        self.items.try_reserve(other.items.len())?;
        self.items.extend(other.items);
        Ok(())
    }

    /// Flip an entry's selection flag. Returns the new value.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let item = self.items.get_mut(index)?;
        item.selected = !item.selected;
        Some(item.selected)
    }

    /// Indices of every flagged entry, in order.
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Drop every entry and release the storage.
    pub fn cleanup(&mut self) {
        self.items = Vec::new();
    }
}
