//! List control - a scrollable, selectable list of text entries.
//!
//! The list provides:
//! - Keyboard navigation (Up/Down, Page-Up/Page-Down) that keeps the active
//!   entry in view
//! - Single-select, where the active entry is the selection, or multi-select,
//!   where every entry has its own flag (Space, re-click or double-click)
//! - Mouse wheel panning and an optional vertical scrollbar child
//! - A selection callback, run once the triggering event has been handled
//!
//! # Example
//!
//! ```ignore
//! let list = ListHandle::create(&mut window, None, Rect::new(0, 0, 30, 10),
//!     ListStyle::new().vertical_scrollbar(true))?;
//! list.add_items(&mut window, &["one", "two", "three"])?;
//! list.set_selection_callback(&mut window, |window, list| {
//!     log::info!("active: {:?}", list.active(window).ok());
//! })?;
//! ```

pub mod events;
pub mod item;
pub mod render;
mod state;

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use conwin::{
    Area, BorderKind, Control, ControlContext, ControlError, ControlId, Event, EventResult, Point,
    Rect, Window,
};

use crate::error::ListError;
use crate::scrollbar::ScrollBar;

pub use events::Outcome;
pub use item::{ItemStore, ListItem};
pub use render::RowLayout;
pub use state::ListState;

/// Creation-time behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListStyle {
    pub vertical_scrollbar: bool,
    pub multi_select: bool,
    pub deselect_on_lose_focus: bool,
}

impl ListStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scrollbar in the right border column.
    pub fn vertical_scrollbar(mut self, enabled: bool) -> Self {
        self.vertical_scrollbar = enabled;
        self
    }

    /// Give every entry its own selection flag.
    pub fn multi_select(mut self, enabled: bool) -> Self {
        self.multi_select = enabled;
        self
    }

    /// Clear the active entry when focus leaves the list.
    pub fn deselect_on_lose_focus(mut self, enabled: bool) -> Self {
        self.deselect_on_lose_focus = enabled;
        self
    }
}

type SelectionCallback = Rc<RefCell<dyn FnMut(&mut Window, ListHandle)>>;

/// The list payload stored in the window's control tree.
pub struct ListControl {
    state: ListState,
    scrollbar: Option<ControlId>,
    on_selection_change: Option<SelectionCallback>,
    /// Child that took the last mouse press (single or double); it keeps
    /// getting drags and the release.
    pressed_child: Option<ControlId>,
}

impl fmt::Debug for ListControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListControl")
            .field("state", &self.state)
            .field("scrollbar", &self.scrollbar)
            .field("has_callback", &self.on_selection_change.is_some())
            .finish()
    }
}

/// Smallest rectangle that leaves a one-cell client area inside the border.
const MIN_SIZE: u16 = 3;

fn visible_rows(cx: &ControlContext<'_>) -> usize {
    cx.client_size().1 as usize
}

/// Scrollbar placement: right border column, between the corners.
fn scrollbar_rect(width: u16, height: u16) -> Rect {
    Rect::new(width - 1, 1, 1, height - 2)
}

impl ListControl {
    fn new(style: ListStyle) -> Self {
        Self {
            state: ListState::new(style),
            scrollbar: None,
            on_selection_change: None,
            pressed_child: None,
        }
    }

    /// Create a list in `window`. `rect` is in the parent's coordinates
    /// (the screen when `parent` is `None`).
    pub fn create(
        window: &mut Window,
        parent: Option<ControlId>,
        rect: Rect,
        style: ListStyle,
    ) -> Result<ListHandle, ListError> {
        if rect.width < MIN_SIZE || rect.height < MIN_SIZE {
            return Err(ControlError::InvalidGeometry(rect).into());
        }

        let id = window.create_control(parent, rect, true, Box::new(Self::new(style)))?;
        let init = window
            .with_control::<Self, _, _>(id, |list, cx| list.init(cx, style))
            .map_err(ListError::from)
            .and_then(|result| result);

        match init {
            Ok(()) => {
                log::debug!("created list {id} ({style:?})");
                Ok(ListHandle { id })
            }
            Err(e) => {
                log::warn!("list {id} failed to initialize: {e}");
                if let Err(destroy_err) = window.destroy(id) {
                    log::warn!("failed to release list {id}: {destroy_err}");
                }
                Err(e)
            }
        }
    }

    fn init(&mut self, cx: &mut ControlContext<'_>, style: ListStyle) -> Result<(), ListError> {
        let full = cx.full_rect().at_origin();
        cx.set_client_rect(full.inset(1))?;
        self.draw_border(cx);

        if style.vertical_scrollbar {
            let target = Some(cx.id());
            let bar = ScrollBar::create_child(cx, scrollbar_rect(full.width, full.height), target)?;
            self.scrollbar = Some(bar);
        }

        self.paint(cx);
        Ok(())
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn scrollbar(&self) -> Option<ControlId> {
        self.scrollbar
    }

    // -------------------------------------------------------------------------
    // Operations (run with the list's context)
    // -------------------------------------------------------------------------

    pub fn reposition(&mut self, cx: &mut ControlContext<'_>, rect: Rect) -> Result<(), ListError> {
        if rect.width < MIN_SIZE || rect.height < MIN_SIZE {
            return Err(ControlError::InvalidGeometry(rect).into());
        }
        cx.reposition(rect)?;
        self.draw_border(cx);

        if let Some(bar) = self.scrollbar {
            let bar_rect = scrollbar_rect(rect.width, rect.height);
            cx.with_child::<ScrollBar, _, _>(bar, |bar, bar_cx| bar.reposition(bar_cx, bar_rect))??;
        }

        self.state.fit_viewport(visible_rows(cx));
        self.paint(cx);
        Ok(())
    }

    pub fn set_active(&mut self, cx: &mut ControlContext<'_>, index: usize) -> Result<(), ListError> {
        self.state.set_active(index, visible_rows(cx))?;
        self.notify_selection(cx);
        self.paint(cx);
        Ok(())
    }

    pub fn add_items<S: AsRef<str>>(
        &mut self,
        cx: &mut ControlContext<'_>,
        texts: &[S],
    ) -> Result<(), ListError> {
        self.state.append_texts(texts, visible_rows(cx))?;
        self.paint(cx);
        Ok(())
    }

    pub fn add_item_store(&mut self, cx: &mut ControlContext<'_>, store: ItemStore) -> Result<(), ListError> {
        self.state.append_store(store, visible_rows(cx))?;
        self.paint(cx);
        Ok(())
    }

    pub fn clear_all_items(&mut self, cx: &mut ControlContext<'_>) {
        if self.state.clear_all() {
            self.notify_selection(cx);
        }
        self.paint(cx);
    }

    pub fn set_selection_callback(
        &mut self,
        callback: impl FnMut(&mut Window, ListHandle) + 'static,
    ) -> Result<(), ListError> {
        if self.on_selection_change.is_some() {
            return Err(ListError::CallbackAlreadyRegistered);
        }
        let callback: SelectionCallback = Rc::new(RefCell::new(callback));
        self.on_selection_change = Some(callback);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Painting and notification
    // -------------------------------------------------------------------------

    fn draw_border(&self, cx: &mut ControlContext<'_>) {
        let full = cx.full_rect().at_origin();
        let attr = cx.default_attr();
        cx.draw_border(full, attr, BorderKind::Sunken);
    }

    /// Redraw the rows, sync the scrollbar and place the cursor.
    fn paint(&self, cx: &mut ControlContext<'_>) {
        render::render_rows(&self.state, cx);
        let rows = visible_rows(cx);

        if let Some(bar) = self.scrollbar {
            let count = self.state.len();
            let top = self.state.first_visible();
            let page = rows.min(count);
            let max = count.saturating_sub(rows);
            if let Err(e) = cx.with_child::<ScrollBar, _, _>(bar, |bar, bar_cx| {
                bar.set_position(bar_cx, top, page, max)
            }) {
                log::warn!("list {} could not update scrollbar: {e}", cx.id());
            }
        }

        if self.state.has_focus() {
            cx.set_client_cursor_location(0, self.state.cursor_row(rows) as u16);
        }
    }

    /// Queue the selection callback behind the current dispatch.
    fn notify_selection(&self, cx: &mut ControlContext<'_>) {
        let Some(callback) = self.on_selection_change.clone() else {
            return;
        };
        let handle = ListHandle { id: cx.id() };
        cx.defer(move |window| match callback.try_borrow_mut() {
            Ok(mut f) => (&mut *f)(window, handle),
            Err(_) => log::warn!("selection callback for list {} is already running", handle.id),
        });
    }

    // -------------------------------------------------------------------------
    // Event plumbing
    // -------------------------------------------------------------------------

    fn apply(&mut self, cx: &mut ControlContext<'_>, event: &Event, outcome: Outcome) -> EventResult {
        if outcome.forward_to_child {
            return self.forward_to_child(cx, event);
        }
        if let Some(visible) = outcome.cursor {
            let size = cx.config().cursor_size_percent;
            cx.set_cursor_state(visible, size);
        }
        if outcome.selection_changed {
            self.notify_selection(cx);
        }
        if outcome.repaint {
            self.paint(cx);
        }
        if outcome.execute {
            let source = cx.id();
            cx.notify_parent(Event::Execute { source });
        }
        outcome.result()
    }

    /// Hand a non-client mouse event to the child under it.
    fn forward_to_child(&mut self, cx: &mut ControlContext<'_>, event: &Event) -> EventResult {
        let Some((_, location)) = event.mouse_location() else {
            return EventResult::Ignored;
        };
        let Some(hit) = cx.find_child_at(location) else {
            return EventResult::Ignored;
        };
        let consumed = cx.forward_to_child(event, hit);
        if consumed && matches!(event, Event::MouseDown { .. } | Event::DoubleClick { .. }) {
            self.pressed_child = Some(hit.id);
        }
        consumed.into()
    }

    /// Keep feeding drags and the release to the child that took the press,
    /// wherever the pointer is.
    fn forward_to_pressed(&mut self, cx: &mut ControlContext<'_>, child: ControlId, event: &Event) -> EventResult {
        if matches!(event, Event::MouseUp { .. }) {
            self.pressed_child = None;
        }
        let Some((area, location)) = event.mouse_location() else {
            return EventResult::Ignored;
        };
        let own = match area {
            Area::Client => {
                let client = cx.client_rect();
                Point::new(client.x + location.x, client.y + location.y)
            }
            Area::NonClient => location,
        };
        match cx.map_to_child(child, own) {
            Some(hit) => cx.forward_to_child(event, hit).into(),
            None => EventResult::Ignored,
        }
    }

    fn on_scroll_changed(&mut self, cx: &mut ControlContext<'_>, scrollbar: ControlId) -> EventResult {
        match cx.with_child::<ScrollBar, _, _>(scrollbar, |bar, _| bar.position()) {
            Ok(raw) => {
                self.state.on_scrollbar_position_changed(raw, visible_rows(cx));
                self.paint(cx);
                EventResult::Consumed
            }
            Err(e) => {
                log::warn!("list {} could not read scrollbar {scrollbar}: {e}", cx.id());
                EventResult::Ignored
            }
        }
    }
}

impl Control for ListControl {
    fn handle_event(&mut self, cx: &mut ControlContext<'_>, event: &Event) -> EventResult {
        match event {
            Event::ScrollChanged { scrollbar } if Some(*scrollbar) == self.scrollbar => {
                return self.on_scroll_changed(cx, *scrollbar);
            }
            Event::ParentDestroyed => {
                log::debug!("list {} released {} items", cx.id(), self.state.len());
                self.state.release();
                self.on_selection_change = None;
                return EventResult::Consumed;
            }
            Event::Drag { .. } | Event::MouseUp { .. } => {
                if let Some(child) = self.pressed_child {
                    return self.forward_to_pressed(cx, child, event);
                }
            }
            _ => {}
        }

        let outcome = self.state.handle_event(event, visible_rows(cx));
        self.apply(cx, event, outcome)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// -----------------------------------------------------------------------------
// Handle
// -----------------------------------------------------------------------------

/// Caller-side handle to a list living in a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListHandle {
    id: ControlId,
}

impl ListHandle {
    /// See [`ListControl::create`].
    pub fn create(
        window: &mut Window,
        parent: Option<ControlId>,
        rect: Rect,
        style: ListStyle,
    ) -> Result<Self, ListError> {
        ListControl::create(window, parent, rect, style)
    }

    pub fn id(self) -> ControlId {
        self.id
    }

    fn get(self, window: &Window) -> Result<&ListControl, ListError> {
        window.try_control::<ListControl>(self.id).map_err(ListError::from)
    }

    fn with<R>(
        self,
        window: &mut Window,
        f: impl FnOnce(&mut ListControl, &mut ControlContext<'_>) -> Result<R, ListError>,
    ) -> Result<R, ListError> {
        window.with_control::<ListControl, _, _>(self.id, f)?
    }

    /// Read-only view of the list state.
    pub fn state(self, window: &Window) -> Result<&ListState, ListError> {
        Ok(&self.get(window)?.state)
    }

    pub fn scrollbar(self, window: &Window) -> Result<Option<ControlId>, ListError> {
        Ok(self.get(window)?.scrollbar)
    }

    /// Move and resize the list, its border and scrollbar, then repaint.
    pub fn reposition(self, window: &mut Window, rect: Rect) -> Result<(), ListError> {
        self.with(window, |list, cx| list.reposition(cx, rect))
    }

    /// Index of the active entry.
    pub fn active(self, window: &Window) -> Result<usize, ListError> {
        self.get(window)?.state.active().ok_or(ListError::NoActiveItem)
    }

    /// Activate `index`, scroll it into view, notify and repaint.
    pub fn set_active(self, window: &mut Window, index: usize) -> Result<(), ListError> {
        self.with(window, |list, cx| list.set_active(cx, index))
    }

    pub fn is_selected(self, window: &Window, index: usize) -> Result<bool, ListError> {
        Ok(self.get(window)?.state.is_selected(index))
    }

    pub fn selected_indices(self, window: &Window) -> Result<Vec<usize>, ListError> {
        Ok(self.get(window)?.state.selected_indices())
    }

    pub fn first_visible(self, window: &Window) -> Result<usize, ListError> {
        Ok(self.get(window)?.state.first_visible())
    }

    pub fn item_count(self, window: &Window) -> Result<usize, ListError> {
        Ok(self.get(window)?.state.len())
    }

    /// Append one unselected entry per string.
    pub fn add_items<S: AsRef<str>>(self, window: &mut Window, texts: &[S]) -> Result<(), ListError> {
        self.with(window, |list, cx| list.add_items(cx, texts))
    }

    /// Append every entry of `store`, flags included.
    pub fn add_item_store(self, window: &mut Window, store: ItemStore) -> Result<(), ListError> {
        self.with(window, |list, cx| list.add_item_store(cx, store))
    }

    /// Copy entry `index`'s text into `out`.
    pub fn item_text(self, window: &Window, index: usize, out: &mut String) -> Result<(), ListError> {
        self.get(window)?.state.item_text(index, out)
    }

    pub fn clear_all_items(self, window: &mut Window) -> Result<(), ListError> {
        self.with(window, |list, cx| {
            list.clear_all_items(cx);
            Ok(())
        })
    }

    /// Register the selection callback. Only one may be registered; later
    /// attempts fail and leave the first in place.
    pub fn set_selection_callback(
        self,
        window: &mut Window,
        callback: impl FnMut(&mut Window, ListHandle) + 'static,
    ) -> Result<(), ListError> {
        self.with(window, |list, _| list.set_selection_callback(callback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conwin::WindowConfig;

    #[test]
    fn test_handle_to_other_control_reports_wrong_kind() {
        let mut window = Window::new(80, 25, WindowConfig::default());
        let list = ListHandle::create(
            &mut window,
            None,
            Rect::new(0, 0, 20, 12),
            ListStyle::new().vertical_scrollbar(true),
        )
        .unwrap();
        let bar = list.scrollbar(&window).unwrap().unwrap();

        let stray = ListHandle { id: bar };
        assert!(matches!(
            stray.item_count(&window),
            Err(ListError::Control(ControlError::WrongKind { id, .. })) if id == bar
        ));

        window.destroy(list.id()).unwrap();
        assert!(matches!(
            list.item_count(&window),
            Err(ListError::Control(ControlError::NoSuchControl(_)))
        ));
    }
}
