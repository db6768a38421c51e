use unicode_width::UnicodeWidthChar;

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Lay out `s` left-aligned in `max_width` cells.
///
/// Yields `(column, char, width)` for every character that fits. Zero-width
/// characters are dropped and a double-width character that would straddle
/// the edge is left out rather than split.
pub fn clip_to_width(s: &str, max_width: usize) -> impl Iterator<Item = (usize, char, usize)> + '_ {
    let mut column = 0;
    s.chars()
        .filter(|ch| char_width(*ch) > 0)
        .map_while(move |ch| {
            let width = char_width(ch);
            if column + width > max_width {
                return None;
            }
            let at = column;
            column += width;
            Some((at, ch, width))
        })
}
