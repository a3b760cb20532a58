//! Raw column <-> display column mapping.
//!
//! Both directions walk the raw bytes from the start of the line using the
//! same advance rule as `render::expand_tabs`, so a mapped column always
//! lands on the cell the renderer actually produced.

use crate::render::next_tab_stop;

/// Display column of raw byte offset `raw_col` (clamped to the line length).
pub fn raw_to_display(raw: &[u8], raw_col: usize, tab_stop: usize) -> usize {
    let end = raw_col.min(raw.len());
    raw[..end].iter().fold(0, |col, &b| advance(col, b, tab_stop))
}

/// Raw byte offset whose display span covers `display_col`.
///
/// Returns the index of the first byte after which the accumulated display
/// width exceeds `display_col`; a column inside a tab's expansion maps to the
/// tab itself. Targets beyond the line's display width map to `raw.len()`.
pub fn display_to_raw(raw: &[u8], display_col: usize, tab_stop: usize) -> usize {
    let mut col = 0;
    for (idx, &b) in raw.iter().enumerate() {
        col = advance(col, b, tab_stop);
        if col > display_col {
            return idx;
        }
    }
    raw.len()
}

#[inline]
fn advance(col: usize, b: u8, tab_stop: usize) -> usize {
    if b == b'\t' {
        next_tab_stop(col, tab_stop)
    } else {
        col + 1
    }
}
