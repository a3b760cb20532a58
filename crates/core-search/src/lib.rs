//! Incremental substring search over a `Document`'s display text.
//!
//! Lifecycle: a `SearchSession` exists only while the search prompt is open.
//! It starts in `Prompting` (no match yet), moves to `Active` once a match
//! has been found, and is consumed by `confirm` or `cancel`, which return the
//! editor to idle and remove the match overlay.
//!
//! Matching runs against display text (tabs expanded), so found offsets are
//! display columns. The cursor is placed on the raw column covering the
//! match start via `Line::display_to_raw`.
//!
//! Resumption rules:
//! * query edits restart from the cursor line, scanning whole lines forward
//!   and wrapping at the end of the document;
//! * find next / previous with an unchanged query first look for another
//!   occurrence on the current match's line strictly after / before the
//!   current start, then scan the following lines in that direction,
//!   wrapping (the current match's line is scanned last, in full).

mod matcher;

use core_state::Document;
use core_text::Position;
use matcher::{find_after, find_before};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Line reached after `k` steps from `start` in this direction, wrapping within `len` lines.
    fn nth_line(self, start: usize, k: usize, len: usize) -> usize {
        match self {
            Direction::Forward => (start + k) % len,
            Direction::Backward => (start + len - k % len) % len,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Prompting,
    Active,
}

/// Location of the current match in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub line: usize,
    pub display_start: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: Vec<u8>,
    last_match: Option<SearchMatch>,
    direction: Direction,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_match(&self) -> Option<SearchMatch> {
        self.last_match
    }

    pub fn phase(&self) -> SearchPhase {
        if self.last_match.is_some() {
            SearchPhase::Active
        } else {
            SearchPhase::Prompting
        }
    }

    /// Append `byte` to the query and search again.
    pub fn push(
        &mut self,
        byte: u8,
        doc: &mut Document,
        cursor: &mut Position,
    ) -> Option<SearchMatch> {
        self.query.push(byte);
        self.query_changed(doc, cursor)
    }

    /// Drop the last query byte and search again. Returns `None` without
    /// touching anything when the query is already empty.
    pub fn pop(&mut self, doc: &mut Document, cursor: &mut Position) -> Option<SearchMatch> {
        self.query.pop()?;
        self.query_changed(doc, cursor)
    }

    pub fn find_next(&mut self, doc: &mut Document, cursor: &mut Position) -> Option<SearchMatch> {
        self.direction = Direction::Forward;
        self.run(doc, cursor, true)
    }

    pub fn find_previous(
        &mut self,
        doc: &mut Document,
        cursor: &mut Position,
    ) -> Option<SearchMatch> {
        self.direction = Direction::Backward;
        self.run(doc, cursor, true)
    }

    /// Accept the current match. The cursor stays where the match put it.
    pub fn confirm(self, doc: &mut Document) -> Option<SearchMatch> {
        doc.clear_match_overlay();
        tracing::debug!(target: "search", matched = self.last_match.is_some(), "search_confirm");
        self.last_match
    }

    /// Abandon the session. The cursor is left at the last visited match.
    pub fn cancel(self, doc: &mut Document) {
        doc.clear_match_overlay();
        tracing::debug!(target: "search", "search_cancel");
    }

    fn query_changed(&mut self, doc: &mut Document, cursor: &mut Position) -> Option<SearchMatch> {
        self.direction = Direction::Forward;
        self.run(doc, cursor, false)
    }

    fn run(&mut self, doc: &mut Document, cursor: &mut Position, resume: bool) -> Option<SearchMatch> {
        let total = doc.line_count();
        if self.query.is_empty() || total == 0 {
            doc.clear_match_overlay();
            self.last_match = None;
            return None;
        }

        let resume_from = self.last_match.filter(|m| resume && m.line < total);
        let mut hit = None;
        let scan_start = match resume_from {
            Some(m) => {
                if let Some(line) = doc.line(m.line) {
                    hit = match self.direction {
                        Direction::Forward => {
                            find_after(line.display(), &self.query, Some(m.display_start))
                        }
                        Direction::Backward => find_before(line.display(), &self.query, m.display_start),
                    }
                    .map(|start| (m.line, start));
                }
                self.direction.nth_line(m.line, 1, total)
            }
            None => cursor.line.min(total - 1),
        };

        if hit.is_none() {
            hit = (0..total).find_map(|k| {
                let idx = self.direction.nth_line(scan_start, k, total);
                let display = doc.line(idx)?.display();
                let found = match self.direction {
                    Direction::Forward => find_after(display, &self.query, None),
                    Direction::Backward => find_before(display, &self.query, display.len()),
                };
                found.map(|start| (idx, start))
            });
        }

        let Some((line, display_start)) = hit else {
            tracing::trace!(target: "search", query_len = self.query.len(), resume, "search_miss");
            doc.clear_match_overlay();
            if !resume {
                self.last_match = None;
            }
            return None;
        };

        let found = SearchMatch {
            line,
            display_start,
            len: self.query.len(),
        };
        cursor.line = line;
        cursor.byte = doc.line(line).map_or(0, |l| l.display_to_raw(display_start));
        doc.set_match_overlay(line, display_start..display_start + found.len);
        self.last_match = Some(found);
        tracing::trace!(
            target: "search",
            line,
            display_start,
            raw_col = cursor.byte,
            direction = ?self.direction,
            "search_hit"
        );
        Some(found)
    }
}
