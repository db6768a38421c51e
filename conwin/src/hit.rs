use crate::control::{ControlHeader, ControlId, Window};
use crate::event::{Area, Point};

/// A control found under a point, with the point mapped into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildHit {
    pub id: ControlId,
    pub area: Area,
    /// Client-relative for [`Area::Client`], else relative to the full rect.
    pub location: Point,
}

/// Find the child of `parent` under `location` (parent's own coordinates).
/// With `recurse`, the deepest descendant containing the point wins.
pub fn find_child_at(
    window: &Window,
    parent: ControlId,
    location: Point,
    recurse: bool,
) -> Option<ChildHit> {
    let header = window.header(parent)?;

    // Check children in reverse order (last created = on top)
    for child in header.children().iter().rev() {
        let Some(child_header) = window.header(*child) else {
            continue;
        };
        let rect = child_header.full_rect();
        if !rect.contains(location.x, location.y) {
            continue;
        }

        let local = Point::new(location.x - rect.x, location.y - rect.y);
        if recurse {
            if let Some(hit) = find_child_at(window, *child, local, true) {
                return Some(hit);
            }
        }
        return Some(resolve(*child, child_header, local));
    }

    None
}

/// Find the top-level control under a screen position.
pub fn find_top_level_at(window: &Window, x: u16, y: u16) -> Option<ChildHit> {
    for id in window.top_level().iter().rev() {
        let Some(header) = window.header(*id) else {
            continue;
        };
        let rect = header.full_rect();
        if rect.contains(x, y) {
            return Some(resolve(*id, header, Point::new(x - rect.x, y - rect.y)));
        }
    }
    None
}

pub(crate) fn resolve(id: ControlId, header: &ControlHeader, local: Point) -> ChildHit {
    let client = header.client_rect();
    if client.contains(local.x, local.y) {
        ChildHit {
            id,
            area: Area::Client,
            location: Point::new(local.x - client.x, local.y - client.y),
        }
    } else {
        ChildHit {
            id,
            area: Area::NonClient,
            location: local,
        }
    }
}
