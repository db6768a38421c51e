use crate::buffer::{Buffer, Cell};
use crate::layout::Rect;
use crate::types::{Attr, Color};

/// Border styles a control can draw around its client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderKind {
    #[default]
    Single,
    Double,
    /// Shadowed top/left edges, highlighted bottom/right edges.
    Sunken,
    /// Highlighted top/left edges, shadowed bottom/right edges.
    Raised,
}

impl BorderKind {
    fn glyphs(self) -> (char, char, char, char, char, char) {
        match self {
            BorderKind::Double => ('╔', '╗', '╚', '╝', '═', '║'),
            BorderKind::Single | BorderKind::Sunken | BorderKind::Raised => {
                ('┌', '┐', '└', '┘', '─', '│')
            }
        }
    }

    /// Attributes for the (top/left, bottom/right) edges.
    fn edge_attrs(self, attr: Attr) -> (Attr, Attr) {
        let shadow = attr.with_fg(if attr.bg == Color::Black {
            Color::DarkGray
        } else {
            Color::Black
        });
        let highlight = attr.with_fg(Color::White);
        match self {
            BorderKind::Single | BorderKind::Double => (attr, attr),
            BorderKind::Sunken => (shadow, highlight),
            BorderKind::Raised => (highlight, shadow),
        }
    }
}

/// Draw a one-cell border along the edges of `rect`.
///
/// Rectangles smaller than 2x2 are left untouched.
pub fn draw_border(buf: &mut Buffer, rect: Rect, attr: Attr, kind: BorderKind) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }

    let (tl, tr, bl, br, h, v) = kind.glyphs();
    let (near, far) = kind.edge_attrs(attr);
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    // Corners
    buf.set(rect.x, rect.y, Cell::new(tl).with_attr(near));
    buf.set(right, rect.y, Cell::new(tr).with_attr(near));
    buf.set(rect.x, bottom, Cell::new(bl).with_attr(near));
    buf.set(right, bottom, Cell::new(br).with_attr(far));

    // Horizontal lines
    for x in (rect.x + 1)..right {
        buf.set(x, rect.y, Cell::new(h).with_attr(near));
        buf.set(x, bottom, Cell::new(h).with_attr(far));
    }

    // Vertical lines
    for y in (rect.y + 1)..bottom {
        buf.set(rect.x, y, Cell::new(v).with_attr(near));
        buf.set(right, y, Cell::new(v).with_attr(far));
    }
}
