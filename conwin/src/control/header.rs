use super::ControlId;
use crate::buffer::{Buffer, Cell};
use crate::layout::Rect;
use crate::types::Attr;

/// Text cursor state of a control. The location is client-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub visible: bool,
    pub size_percent: u8,
    pub x: u16,
    pub y: u16,
}

/// Host-owned part of every control node.
#[derive(Debug, Clone)]
pub struct ControlHeader {
    /// Position and size in the parent's coordinates (screen for top level).
    pub(crate) full_rect: Rect,
    /// Client area in the control's own coordinates.
    pub(crate) client_rect: Rect,
    pub(crate) default_attr: Attr,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) cursor: CursorState,
    pub(crate) can_focus: bool,
    pub(crate) surface: Buffer,
}

impl ControlHeader {
    pub(crate) fn new(
        full_rect: Rect,
        parent: Option<ControlId>,
        can_focus: bool,
        default_attr: Attr,
    ) -> Self {
        Self {
            full_rect,
            client_rect: full_rect.at_origin(),
            default_attr,
            parent,
            children: Vec::new(),
            cursor: CursorState::default(),
            can_focus,
            surface: blank_surface(full_rect, default_attr),
        }
    }

    pub fn full_rect(&self) -> Rect {
        self.full_rect
    }

    pub fn client_rect(&self) -> Rect {
        self.client_rect
    }

    pub fn client_size(&self) -> (u16, u16) {
        (self.client_rect.width, self.client_rect.height)
    }

    pub fn default_attr(&self) -> Attr {
        self.default_attr
    }

    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn can_focus(&self) -> bool {
        self.can_focus
    }

    /// The control's own cells, sized to its full rectangle.
    pub fn surface(&self) -> &Buffer {
        &self.surface
    }

    /// Move/resize, keeping the border margins around the client area.
    pub(crate) fn reposition(&mut self, rect: Rect) {
        let old = self.full_rect.at_origin();
        let client = self.client_rect;
        let left = client.x;
        let top = client.y;
        let right = old.right().saturating_sub(client.right());
        let bottom = old.bottom().saturating_sub(client.bottom());

        self.full_rect = rect;
        self.client_rect = rect.at_origin().shrink(top, right, bottom, left);
        self.surface = blank_surface(rect, self.default_attr);
    }
}

fn blank_surface(rect: Rect, attr: Attr) -> Buffer {
    Buffer::filled(rect.width, rect.height, Cell::new(' ').with_attr(attr))
}
