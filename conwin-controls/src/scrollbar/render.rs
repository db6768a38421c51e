use conwin::ControlContext;

use super::state::ScrollbarState;

const UP_ARROW: char = '▲';
const DOWN_ARROW: char = '▼';
const TRACK: char = '░';
const HANDLE: char = '█';

/// Draw the scrollbar over its whole (one column wide) surface.
pub fn render_scrollbar(state: &ScrollbarState, cx: &mut ControlContext<'_>) {
    let (width, height) = cx.client_size();
    let attr = cx.default_attr();
    let geometry = state.geometry(height);

    for y in 0..height {
        let ch = if geometry.arrows && y == 0 {
            UP_ARROW
        } else if geometry.arrows && y == height - 1 {
            DOWN_ARROW
        } else {
            let rel = y - geometry.track_start;
            if rel >= geometry.handle_pos && rel < geometry.handle_pos + geometry.handle_size {
                HANDLE
            } else {
                TRACK
            }
        };
        for x in 0..width {
            cx.set_client_cell(x, y, ch, attr);
        }
    }
}
