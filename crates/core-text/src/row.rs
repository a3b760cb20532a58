//! `Row`: raw bytes plus their tab-expanded display form.
//!
//! Invariant: `display == expand_tabs(raw, tab_stop)` after every public
//! call. Fields are private so the only way to change the raw text is one of
//! the mutators below, each of which re-renders before returning.

use crate::columns::{display_to_raw, raw_to_display};
use crate::render::expand_tabs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    raw: Vec<u8>,
    display: Vec<u8>,
    tab_stop: usize,
}

impl Row {
    pub fn new(raw: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let raw = raw.into();
        let display = expand_tabs(&raw, tab_stop);
        Self {
            raw,
            display,
            tab_stop,
        }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn display(&self) -> &[u8] {
        &self.display
    }

    /// Raw length in bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn display_len(&self) -> usize {
        self.display.len()
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn raw_to_display(&self, raw_col: usize) -> usize {
        raw_to_display(&self.raw, raw_col, self.tab_stop)
    }

    pub fn display_to_raw(&self, display_col: usize) -> usize {
        display_to_raw(&self.raw, display_col, self.tab_stop)
    }

    /// Insert `byte` at `at` (clamped to `[0, len]`). Returns the column used.
    pub fn insert(&mut self, at: usize, byte: u8) -> usize {
        let at = at.min(self.raw.len());
        self.raw.insert(at, byte);
        self.rerender();
        at
    }

    /// Remove the byte at `at`. Out-of-range columns clamp to the last byte;
    /// an empty row is left untouched and yields `None`.
    pub fn remove(&mut self, at: usize) -> Option<u8> {
        if self.raw.is_empty() {
            return None;
        }
        let at = at.min(self.raw.len() - 1);
        let removed = self.raw.remove(at);
        self.rerender();
        Some(removed)
    }

    /// Truncate to `[0, at)` and return the removed tail `[at, len)`.
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.raw.len());
        let tail = self.raw.split_off(at);
        self.rerender();
        tail
    }

    /// Append bytes to the end of the row.
    pub fn append(&mut self, bytes: &[u8]) {
        self.raw.extend_from_slice(bytes);
        self.rerender();
    }

    fn rerender(&mut self) {
        self.display = expand_tabs(&self.raw, self.tab_stop);
    }
}
