//! List rendering.

use conwin::text::clip_to_width;
use conwin::{Attr, ControlContext};

use super::item::ListItem;
use super::state::ListState;

/// How a row is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// Text uses the full row.
    Plain,
    /// Column 0 holds `*` for selected entries, column 1 is a gap, text
    /// starts at column 2.
    Marked,
}

impl RowLayout {
    pub fn for_state(state: &ListState) -> Self {
        if state.is_multi_select() {
            RowLayout::Marked
        } else {
            RowLayout::Plain
        }
    }

    /// Column where the text starts.
    pub fn text_offset(self) -> u16 {
        match self {
            RowLayout::Plain => 0,
            RowLayout::Marked => 2,
        }
    }
}

/// Paint every client row from the state.
pub fn render_rows(state: &ListState, cx: &mut ControlContext<'_>) {
    let (width, height) = cx.client_size();
    let layout = RowLayout::for_state(state);
    let attr = cx.default_attr();

    for row in 0..height {
        let index = state.first_visible() + row as usize;
        match state.item(index) {
            Some(item) => {
                let row_attr = if state.active() == Some(index) {
                    attr.swapped()
                } else {
                    attr
                };
                render_item(cx, row, width, item, layout, row_attr);
            }
            None => fill(cx, row, 0, width, attr),
        }
    }
}

fn render_item(
    cx: &mut ControlContext<'_>,
    row: u16,
    width: u16,
    item: &ListItem,
    layout: RowLayout,
    attr: Attr,
) {
    if layout == RowLayout::Marked {
        let marker = if item.selected { '*' } else { ' ' };
        cx.set_client_cell(0, row, marker, attr);
        cx.set_client_cell(1, row, ' ', attr);
    }

    let offset = layout.text_offset();
    let available = width.saturating_sub(offset);
    let mut end = 0;
    for (column, ch, char_width) in clip_to_width(&item.text, available as usize) {
        cx.set_client_cell(offset + column as u16, row, ch, attr);
        end = (column + char_width) as u16;
    }
    fill(cx, row, offset + end, width, attr);
}

fn fill(cx: &mut ControlContext<'_>, row: u16, from: u16, to: u16, attr: Attr) {
    for x in from..to {
        cx.set_client_cell(x, row, ' ', attr);
    }
}
