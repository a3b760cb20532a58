//! Line store with synchronously maintained display and highlight caches.
//!
//! Every raw-text mutation goes through a `Document` method that re-renders
//! and re-highlights the touched line before returning, then propagates a
//! changed block-comment state forward with an explicit worklist. Callers
//! only ever get shared references to `Line`, so caches cannot drift.
//!
//! Propagation invariant: line `k + 1` was classified with a starting
//! comment state equal to line `k`'s stored `open_comment`. The worklist
//! stops at the first line whose end state did not change, because every
//! line below it is already consistent with that state.

use core_syntax::{Highlight, LanguageProfile, highlight_line};
use core_text::{DEFAULT_TAB_STOP, Row};
use std::collections::VecDeque;
use std::ops::Range;
use std::sync::Arc;

/// One logical line: raw text, display text, classifications and carried comment state.
#[derive(Debug, Clone)]
pub struct Line {
    index: usize,
    row: Row,
    classes: Vec<Highlight>,
    open_comment: bool,
}

impl Line {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn raw(&self) -> &[u8] {
        self.row.raw()
    }

    pub fn display(&self) -> &[u8] {
        self.row.display()
    }

    pub fn classes(&self) -> &[Highlight] {
        &self.classes
    }

    /// Raw length in bytes.
    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    pub fn display_len(&self) -> usize {
        self.row.display_len()
    }

    /// True when the line ends inside an unterminated block comment.
    pub fn ends_in_open_comment(&self) -> bool {
        self.open_comment
    }

    pub fn raw_to_display(&self, raw_col: usize) -> usize {
        self.row.raw_to_display(raw_col)
    }

    pub fn display_to_raw(&self, display_col: usize) -> usize {
        self.row.display_to_raw(display_col)
    }

    /// Display slice starting at `offset` at most `width` cells wide, with the
    /// parallel classification slice. Both are empty when scrolled past the end.
    pub fn visible(&self, offset: usize, width: usize) -> (&[u8], &[Highlight]) {
        let display = self.row.display();
        let start = offset.min(display.len());
        let end = start.saturating_add(width).min(display.len());
        (&display[start..end], &self.classes[start..end])
    }
}

/// Modification summary handed to status / save-confirmation logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSummary {
    pub line_count: usize,
    pub modified: bool,
    pub modifications: u64,
}

#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    profile: Option<Arc<LanguageProfile>>,
    tab_stop: usize,
    modifications: u64,
    overlay_line: Option<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP, None)
    }
}

impl Document {
    pub fn new(tab_stop: usize, profile: Option<Arc<LanguageProfile>>) -> Self {
        Self {
            lines: Vec::new(),
            profile,
            tab_stop: tab_stop.max(1),
            modifications: 0,
            overlay_line: None,
        }
    }

    /// Build a document from newline-stripped lines. The result is unmodified.
    pub fn from_lines<I, L>(lines: I, tab_stop: usize, profile: Option<Arc<LanguageProfile>>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new(tab_stop, profile);
        let mut open_comment = false;
        for (index, raw) in lines.into_iter().enumerate() {
            let row = Row::new(raw, doc.tab_stop);
            let hl = highlight_line(row.display(), doc.profile.as_deref(), open_comment);
            open_comment = hl.ends_in_comment;
            doc.lines.push(Line {
                index,
                row,
                classes: hl.classes,
                open_comment,
            });
        }
        tracing::debug!(
            target: "state.document",
            lines = doc.lines.len(),
            profile = doc.profile.as_ref().map(|p| p.name()),
            "document_loaded"
        );
        doc
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Raw length of `index`, zero for lines past the end.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, Line::len)
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn profile(&self) -> Option<&LanguageProfile> {
        self.profile.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modifications > 0
    }

    pub fn modifications(&self) -> u64 {
        self.modifications
    }

    /// Reset the modification counter (after a successful save).
    pub fn mark_saved(&mut self) {
        self.modifications = 0;
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            line_count: self.lines.len(),
            modified: self.is_modified(),
            modifications: self.modifications,
        }
    }

    /// Swap the active profile and reclassify every line.
    pub fn set_profile(&mut self, profile: Option<Arc<LanguageProfile>>) {
        self.profile = profile;
        self.overlay_line = None;
        let mut open_comment = false;
        for line in &mut self.lines {
            let hl = highlight_line(line.row.display(), self.profile.as_deref(), open_comment);
            line.classes = hl.classes;
            line.open_comment = hl.ends_in_comment;
            open_comment = hl.ends_in_comment;
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Mutation primitives
    // ---------------------------------------------------------------------------------------------

    /// Insert a new line at `index` (clamped to `[0, line_count]`). Returns the index used.
    pub fn insert_line(&mut self, index: usize, text: impl Into<Vec<u8>>) -> usize {
        let at = index.min(self.lines.len());
        // Seed with the state the following line was classified against so the
        // worklist only cascades when this line actually changes it.
        let inherited = self.start_state(at);
        self.lines.insert(
            at,
            Line {
                index: at,
                row: Row::new(text, self.tab_stop),
                classes: Vec::new(),
                open_comment: inherited,
            },
        );
        self.renumber_from(at + 1);
        self.shift_overlay_on_insert(at);
        self.refresh_from(at);
        self.touch();
        tracing::trace!(target: "state.edit", op = "insert_line", line = at, "edit");
        at
    }

    /// Remove the line at `index` (clamped to `[0, line_count - 1]`). No-op on an empty document.
    pub fn delete_line(&mut self, index: usize) {
        let Some(at) = self.clamp_line(index) else {
            return;
        };
        let removed = self.remove_line(at);
        if at < self.lines.len() && removed.open_comment != self.start_state(at) {
            self.refresh_from(at);
        }
        self.touch();
        tracing::trace!(target: "state.edit", op = "delete_line", line = at, "edit");
    }

    /// Insert `byte` into line `line` at `column` (clamped to `[0, len]`).
    /// An empty document gains a line first. Returns the (line, column) written.
    pub fn insert_character(&mut self, line: usize, column: usize, byte: u8) -> (usize, usize) {
        if self.lines.is_empty() {
            self.insert_line(0, Vec::new());
        }
        let at = line.min(self.lines.len() - 1);
        let col = self.lines[at].row.insert(column, byte);
        self.refresh_from(at);
        self.touch();
        tracing::trace!(target: "state.edit", op = "insert_char", line = at, col, "edit");
        (at, col)
    }

    /// Remove the byte at `column` of `line` (column clamped to the last byte).
    /// Returns the removed byte; empty lines and documents are left untouched.
    pub fn delete_character(&mut self, line: usize, column: usize) -> Option<u8> {
        let at = self.clamp_line(line)?;
        let removed = self.lines[at].row.remove(column)?;
        self.refresh_from(at);
        self.touch();
        tracing::trace!(target: "state.edit", op = "delete_char", line = at, col = column, "edit");
        Some(removed)
    }

    /// Split `line` at `column`: the line keeps `[0, column)` and a new line
    /// holding `[column, end)` is inserted right after it. Returns the new line's index.
    pub fn split_line(&mut self, line: usize, column: usize) -> usize {
        if self.lines.is_empty() {
            self.insert_line(0, Vec::new());
        }
        let at = line.min(self.lines.len() - 1);
        let tail = self.lines[at].row.split_off(column);
        // The line below was classified against this line's old end state;
        // the tail takes over that boundary.
        let next = at + 1;
        let carried = self.lines[at].open_comment;
        self.lines.insert(
            next,
            Line {
                index: next,
                row: Row::new(tail, self.tab_stop),
                classes: Vec::new(),
                open_comment: carried,
            },
        );
        self.renumber_from(next);
        self.shift_overlay_on_insert(next);
        self.refresh_through(at, next);
        self.touch();
        tracing::trace!(target: "state.edit", op = "split_line", line = at, col = column, "edit");
        next
    }

    /// Append line `line` onto the previous line and remove it.
    ///
    /// Returns the previous line's index and its former length (where the
    /// cursor belongs), or `None` for line 0 / out-of-range on an empty document.
    pub fn merge_line_up(&mut self, line: usize) -> Option<(usize, usize)> {
        let at = self.clamp_line(line)?;
        if at == 0 {
            return None;
        }
        let prev = at - 1;
        let join_col = self.lines[prev].len();
        let removed = self.remove_line(at);
        // The line now at `at` was classified against the removed line's end
        // state; the merged line inherits that role.
        self.lines[prev].open_comment = removed.open_comment;
        self.lines[prev].row.append(removed.row.raw());
        self.refresh_from(prev);
        self.touch();
        tracing::trace!(target: "state.edit", op = "merge_line_up", line = at, join_col, "edit");
        Some((prev, join_col))
    }

    // ---------------------------------------------------------------------------------------------
    // Search overlay
    // ---------------------------------------------------------------------------------------------

    /// Overwrite the display range `cells` of `line` with `Highlight::Match`.
    /// Any previous overlay is cleared first. Out-of-range input is clamped.
    pub fn set_match_overlay(&mut self, line: usize, cells: Range<usize>) {
        self.clear_match_overlay();
        let Some(at) = self.clamp_line(line) else {
            return;
        };
        let classes = &mut self.lines[at].classes;
        let end = cells.end.min(classes.len());
        let start = cells.start.min(end);
        classes[start..end].fill(Highlight::Match);
        self.overlay_line = Some(at);
    }

    /// Restore normal classification on the overlaid line, if any.
    pub fn clear_match_overlay(&mut self) {
        if let Some(at) = self.overlay_line.take()
            && at < self.lines.len()
        {
            let start = self.start_state(at);
            let line = &mut self.lines[at];
            line.classes = highlight_line(line.row.display(), self.profile.as_deref(), start).classes;
        }
    }

    pub fn overlay_line(&self) -> Option<usize> {
        self.overlay_line
    }

    // ---------------------------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------------------------

    /// Every line's raw text followed by `\n`, in order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(line.raw());
            out.push(b'\n');
        }
        out
    }

    // ---------------------------------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------------------------------

    fn clamp_line(&self, index: usize) -> Option<usize> {
        (!self.lines.is_empty()).then(|| index.min(self.lines.len() - 1))
    }

    /// Comment state line `index` starts in (the previous line's end state).
    fn start_state(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .and_then(|prev| self.lines.get(prev))
            .is_some_and(|l| l.open_comment)
    }

    fn touch(&mut self) {
        self.modifications += 1;
    }

    fn renumber_from(&mut self, start: usize) {
        for (i, line) in self.lines.iter_mut().enumerate().skip(start) {
            line.index = i;
        }
    }

    fn remove_line(&mut self, at: usize) -> Line {
        let removed = self.lines.remove(at);
        self.renumber_from(at);
        match self.overlay_line {
            Some(o) if o == at => self.overlay_line = None,
            Some(o) if o > at => self.overlay_line = Some(o - 1),
            _ => {}
        }
        removed
    }

    fn shift_overlay_on_insert(&mut self, at: usize) {
        if let Some(o) = self.overlay_line
            && o >= at
        {
            self.overlay_line = Some(o + 1);
        }
    }

    /// Reclassify `start`, then keep going down while end states change.
    fn refresh_from(&mut self, start: usize) {
        self.refresh_through(start, start);
    }

    /// Reclassify `start..=through` unconditionally, then continue past
    /// `through` only while end states change.
    fn refresh_through(&mut self, start: usize, through: usize) {
        let mut worklist = VecDeque::from([start]);
        let mut visited = 0usize;
        while let Some(idx) = worklist.pop_front() {
            if idx >= self.lines.len() {
                break;
            }
            let starts_in = self.start_state(idx);
            let line = &mut self.lines[idx];
            let hl = highlight_line(line.row.display(), self.profile.as_deref(), starts_in);
            line.classes = hl.classes;
            visited += 1;
            if Some(idx) == self.overlay_line {
                self.overlay_line = None;
            }
            let changed = line.open_comment != hl.ends_in_comment;
            line.open_comment = hl.ends_in_comment;
            if changed || idx < through {
                worklist.push_back(idx + 1);
            }
        }
        if visited > 1 {
            tracing::trace!(target: "state.highlight", start, visited, "comment_cascade");
        }
    }
}
