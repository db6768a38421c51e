use super::{Control, ControlId, EventResult, Window};
use crate::border::{draw_border, BorderKind};
use crate::buffer::Cell;
use crate::config::WindowConfig;
use crate::error::ControlError;
use crate::event::{Event, Point};
use crate::hit::{find_child_at, resolve, ChildHit};
use crate::layout::Rect;
use crate::text::char_width;
use crate::types::Attr;

/// What a control can reach while it handles an event: its own header and
/// surface, its children, and the deferred notification queue.
pub struct ControlContext<'a> {
    window: &'a mut Window,
    id: ControlId,
}

impl std::fmt::Debug for ControlContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlContext").field("id", &self.id).finish()
    }
}

impl<'a> ControlContext<'a> {
    pub(crate) fn new(window: &'a mut Window, id: ControlId) -> Self {
        Self { window, id }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn config(&self) -> &WindowConfig {
        self.window.config()
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn full_rect(&self) -> Rect {
        self.window
            .header(self.id)
            .map(|h| h.full_rect)
            .unwrap_or_default()
    }

    pub fn client_rect(&self) -> Rect {
        self.window
            .header(self.id)
            .map(|h| h.client_rect)
            .unwrap_or_default()
    }

    pub fn client_size(&self) -> (u16, u16) {
        let rect = self.client_rect();
        (rect.width, rect.height)
    }

    pub fn default_attr(&self) -> Attr {
        self.window
            .header(self.id)
            .map(|h| h.default_attr)
            .unwrap_or_default()
    }

    pub fn parent(&self) -> Option<ControlId> {
        self.window.header(self.id).and_then(|h| h.parent)
    }

    pub fn children(&self) -> Vec<ControlId> {
        self.window
            .header(self.id)
            .map(|h| h.children.clone())
            .unwrap_or_default()
    }

    /// Set the client area (own coordinates). It must lie inside the control.
    pub fn set_client_rect(&mut self, rect: Rect) -> Result<(), ControlError> {
        let id = self.id;
        let header = self
            .window
            .header_mut(id)
            .ok_or(ControlError::NoSuchControl(id))?;
        if !header.full_rect.at_origin().contains_rect(rect) {
            return Err(ControlError::InvalidGeometry(rect));
        }
        header.client_rect = rect;
        Ok(())
    }

    /// Move and resize this control. The client margins are kept and the
    /// surface is cleared to the default attributes. On error nothing changes.
    pub fn reposition(&mut self, rect: Rect) -> Result<(), ControlError> {
        let id = self.id;
        if rect.is_empty() {
            return Err(ControlError::InvalidGeometry(rect));
        }
        self.window.check_reposition(id, rect)?;
        if let Some(header) = self.window.header_mut(id) {
            header.reposition(rect);
        }
        log::debug!("repositioned control {id} to {rect:?}");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Write one cell in the control's own coordinates (border included).
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, attr: Attr) {
        if let Some(header) = self.window.header_mut(self.id) {
            header.surface.set(x, y, Cell::new(ch).with_attr(attr));
        }
    }

    /// Write one character at a client-relative position, clipped to the
    /// client area. A double-width character also claims the next cell.
    pub fn set_client_cell(&mut self, x: u16, y: u16, ch: char, attr: Attr) {
        let Some(header) = self.window.header_mut(self.id) else {
            return;
        };
        let client = header.client_rect;
        if x >= client.width || y >= client.height {
            return;
        }
        let (sx, sy) = (client.x + x, client.y + y);
        header.surface.set(sx, sy, Cell::new(ch).with_attr(attr));
        if char_width(ch) == 2 && x + 1 < client.width {
            header.surface.set(sx + 1, sy, Cell::continuation(attr));
        }
    }

    /// Draw a border in the control's own coordinates.
    pub fn draw_border(&mut self, rect: Rect, attr: Attr, kind: BorderKind) {
        if let Some(header) = self.window.header_mut(self.id) {
            draw_border(&mut header.surface, rect, attr, kind);
        }
    }

    pub fn set_cursor_state(&mut self, visible: bool, size_percent: u8) {
        if let Some(header) = self.window.header_mut(self.id) {
            header.cursor.visible = visible;
            header.cursor.size_percent = size_percent;
        }
    }

    /// Place the cursor at a client-relative position.
    pub fn set_client_cursor_location(&mut self, x: u16, y: u16) {
        if let Some(header) = self.window.header_mut(self.id) {
            header.cursor.x = x;
            header.cursor.y = y;
        }
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Create a child control. `rect` is in this control's own coordinates.
    pub fn create_child(
        &mut self,
        rect: Rect,
        can_focus: bool,
        widget: Box<dyn Control>,
    ) -> Result<ControlId, ControlError> {
        self.window
            .create_control(Some(self.id), rect, can_focus, widget)
    }

    /// Typed access to a child (or any other control) and its context.
    pub fn with_child<T, R, F>(&mut self, child: ControlId, f: F) -> Result<R, ControlError>
    where
        T: Control,
        F: FnOnce(&mut T, &mut ControlContext<'_>) -> R,
    {
        self.window.with_control(child, f)
    }

    /// The direct child under `location` (own coordinates), if any.
    pub fn find_child_at(&self, location: Point) -> Option<ChildHit> {
        find_child_at(self.window, self.id, location, false)
    }

    /// Map `location` (own coordinates) into `child` even when the point lies
    /// outside it, so a drag keeps reaching the child that started it.
    pub fn map_to_child(&self, child: ControlId, location: Point) -> Option<ChildHit> {
        let header = self.window.header(child)?;
        let rect = header.full_rect();
        let local = Point::new(
            location.x.saturating_sub(rect.x),
            location.y.saturating_sub(rect.y),
        );
        Some(resolve(child, header, local))
    }

    /// Re-express a mouse event in the child's coordinates and deliver it.
    /// Returns true if the child consumed it.
    pub fn forward_to_child(&mut self, event: &Event, hit: ChildHit) -> bool {
        let translated = event.relocated(hit.area, hit.location);
        self.window.dispatch(hit.id, &translated) == EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Deliver `event` to this control's parent once the current dispatch is
    /// complete.
    pub fn notify_parent(&mut self, event: Event) {
        self.window.notify_parent(self.id, event);
    }

    /// Deliver `event` to `target` once the current dispatch is complete.
    pub fn notify(&mut self, target: ControlId, event: Event) {
        self.window.defer(move |window| {
            window.dispatch(target, &event);
        });
    }

    /// Run `task` against the window once the current dispatch is complete.
    pub fn defer(&mut self, task: impl FnOnce(&mut Window) + 'static) {
        self.window.defer(task);
    }
}
