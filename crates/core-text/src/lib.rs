//! Byte-oriented line text primitives.
//!
//! A line is stored twice: the raw bytes the user edits and a tab-expanded
//! display form derived from them. `Row` keeps both in lockstep; the free
//! functions in `render` and `columns` are the pure building blocks it uses
//! and are exported for callers that only hold raw bytes.
//!
//! Columns come in two coordinate systems:
//! * raw column: byte offset into the stored text.
//! * display column: cell offset into the tab-expanded text.
//!
//! Text is treated as single-byte cells; wide or multi-byte characters are
//! not measured specially.

pub mod columns;
pub mod render;
pub mod row;

pub use columns::{display_to_raw, raw_to_display};
pub use render::expand_tabs;
pub use row::Row;

/// Tab stop width used when no configuration overrides it.
pub const DEFAULT_TAB_STOP: usize = 8;

/// A position inside a document expressed as (line index, raw byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    /// Clamp into `[0, line_count]` lines (the line past the end is a valid
    /// cursor row) and `[0, line_len(line)]` bytes.
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if self.line > line_count {
            self.line = line_count;
        }
        let max_len = if self.line < line_count {
            line_len_fn(self.line)
        } else {
            0
        };
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_line_and_byte_into_range() {
        let lens = [3usize, 10];
        let mut pos = Position::new(7, 50);
        pos.clamp_to(lens.len(), |l| lens[l]);
        assert_eq!(pos, Position::new(2, 0));

        let mut pos = Position::new(0, 9);
        pos.clamp_to(lens.len(), |l| lens[l]);
        assert_eq!(pos, Position::new(0, 3));
    }

    #[test]
    fn clamp_on_empty_document_is_origin() {
        let mut pos = Position::new(4, 4);
        pos.clamp_to(0, |_| unreachable!("no lines to measure"));
        assert_eq!(pos, Position::origin());
    }
}
