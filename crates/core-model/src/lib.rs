//! Editor session model.
//!
//! `EditorModel` bundles everything one editing session needs between input
//! events: the `Document`, the cursor, scroll offsets, the text-area
//! geometry, the open prompt (if any) and the timed status message.
//!
//! Invariants (must hold after every public call):
//! * `cursor.line <= document.line_count()`. The line equal to `line_count`
//!   is the virtual line past the end; its only valid column is 0.
//! * `cursor.byte` never exceeds the cursor line's raw length.
//! * After `scroll()`, the cursor's display column lies inside
//!   `[col_offset, col_offset + text_cols)` and its line inside
//!   `[row_offset, row_offset + text_rows)` (when the text area is non-empty).
//!
//! The model never touches the terminal. Rendering reads it through
//! `visible_rows` and `cursor_screen_position`; dispatch mutates it.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use core_search::SearchSession;
use core_state::Document;
use core_syntax::{Highlight, ProfileRegistry, builtin_registry};
use core_text::Position;

/// Rows reserved below the text area (status bar + message bar).
pub const RESERVED_ROWS: u16 = 2;

/// Session-wide knobs resolved from configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses needed to quit with unsaved changes.
    pub quit_times: u32,
    pub message_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_stop: core_text::DEFAULT_TAB_STOP,
            quit_times: 3,
            message_timeout: Duration::from_secs(5),
        }
    }
}

/// Modal prompt occupying the message bar.
#[derive(Debug, Clone)]
pub enum Prompt {
    Search(SearchSession),
    /// Filename being typed for a first save.
    SaveAs(String),
}

impl Prompt {
    /// Text shown in the message bar while the prompt is open.
    pub fn render_text(&self) -> String {
        match self {
            Prompt::Search(session) => format!(
                "Search: {} (Use ESC/Arrows/Enter)",
                String::from_utf8_lossy(session.query())
            ),
            Prompt::SaveAs(name) => format!("Save as: {name} (ESC to cancel)"),
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    set_at: Instant,
}

/// One screen row of the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleRow<'a> {
    /// Horizontally scrolled display bytes with their parallel classes.
    Text {
        display: &'a [u8],
        classes: &'a [Highlight],
    },
    /// Row below the last line.
    Empty,
}

#[derive(Debug)]
pub struct EditorModel {
    document: Document,
    cursor: Position,
    /// Display column of the cursor, refreshed by `scroll`.
    render_col: usize,
    row_offset: usize,
    col_offset: usize,
    text_rows: usize,
    text_cols: usize,
    file_name: Option<PathBuf>,
    status: Option<StatusMessage>,
    quit_remaining: u32,
    prompt: Option<Prompt>,
    settings: Settings,
    registry: ProfileRegistry,
}

impl EditorModel {
    pub fn new(document: Document, settings: Settings) -> Self {
        Self {
            document,
            cursor: Position::origin(),
            render_col: 0,
            row_offset: 0,
            col_offset: 0,
            text_rows: 0,
            text_cols: 0,
            file_name: None,
            status: None,
            quit_remaining: settings.quit_times,
            prompt: None,
            settings,
            registry: builtin_registry().clone(),
        }
    }

    /// Replace the built-in profile table (e.g. with configured extras appended).
    pub fn with_registry(mut self, registry: ProfileRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamping into the document.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
        self.clamp_cursor();
    }

    /// Disjoint borrows of the document and the cursor for operations that
    /// edit one while repositioning the other.
    pub fn document_and_cursor_mut(&mut self) -> (&mut Document, &mut Position) {
        (&mut self.document, &mut self.cursor)
    }

    /// Re-establish the cursor invariants after the document changed under it.
    pub fn clamp_cursor(&mut self) {
        let doc = &self.document;
        self.cursor
            .clamp_to(doc.line_count(), |line| doc.line_len(line));
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Bind the session to `path` and reselect the language profile from it.
    pub fn rename(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let profile = self.registry.select(&path.to_string_lossy());
        self.document.set_profile(profile);
        self.file_name = Some(path);
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Name of the active language profile, if any.
    pub fn file_type(&self) -> Option<&str> {
        self.document.profile().map(|p| p.name())
    }

    // ---------------------------------------------------------------------------------------------
    // Geometry and scrolling
    // ---------------------------------------------------------------------------------------------

    /// Record the terminal size; the text area excludes `RESERVED_ROWS`.
    pub fn set_screen_size(&mut self, cols: u16, rows: u16) {
        self.text_cols = usize::from(cols);
        self.text_rows = usize::from(rows.saturating_sub(RESERVED_ROWS));
        tracing::debug!(
            target: "model",
            cols = self.text_cols,
            rows = self.text_rows,
            "screen_size"
        );
    }

    pub fn text_rows(&self) -> usize {
        self.text_rows
    }

    pub fn text_cols(&self) -> usize {
        self.text_cols
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    pub fn render_col(&self) -> usize {
        self.render_col
    }

    /// Adjust scroll offsets so the cursor is inside the text area.
    pub fn scroll(&mut self) {
        self.render_col = self
            .document
            .line(self.cursor.line)
            .map_or(0, |line| line.raw_to_display(self.cursor.byte));

        if self.cursor.line < self.row_offset {
            self.row_offset = self.cursor.line;
        }
        if self.text_rows > 0 && self.cursor.line >= self.row_offset + self.text_rows {
            self.row_offset = self.cursor.line + 1 - self.text_rows;
        }
        if self.render_col < self.col_offset {
            self.col_offset = self.render_col;
        }
        if self.text_cols > 0 && self.render_col >= self.col_offset + self.text_cols {
            self.col_offset = self.render_col + 1 - self.text_cols;
        }
    }

    /// One entry per text-area row, top to bottom.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        (self.row_offset..self.row_offset + self.text_rows)
            .map(|idx| match self.document.line(idx) {
                Some(line) => {
                    let (display, classes) = line.visible(self.col_offset, self.text_cols);
                    VisibleRow::Text { display, classes }
                }
                None => VisibleRow::Empty,
            })
            .collect()
    }

    /// Cursor location on screen as (column, row), relative to the text area origin.
    pub fn cursor_screen_position(&self) -> (u16, u16) {
        let col = self.render_col.saturating_sub(self.col_offset);
        let row = self.cursor.line.saturating_sub(self.row_offset);
        (
            u16::try_from(col).unwrap_or(u16::MAX),
            u16::try_from(row).unwrap_or(u16::MAX),
        )
    }

    // ---------------------------------------------------------------------------------------------
    // Status message, prompt, quit confirmation
    // ---------------------------------------------------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(target: "model", message = %text, "status_message");
        self.status = Some(StatusMessage {
            text,
            set_at: Instant::now(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Current status message unless it has outlived the configured timeout at `now`.
    pub fn status_message(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| now.saturating_duration_since(m.set_at) < self.settings.message_timeout)
            .map(|m| m.text.as_str())
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn prompt_mut(&mut self) -> Option<&mut Prompt> {
        self.prompt.as_mut()
    }

    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    pub fn take_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    /// Consume one quit confirmation. Returns the number still required
    /// after this press; zero means the quit may proceed.
    pub fn consume_quit_confirmation(&mut self) -> u32 {
        self.quit_remaining = self.quit_remaining.saturating_sub(1);
        self.quit_remaining
    }

    pub fn quit_confirmations_remaining(&self) -> u32 {
        self.quit_remaining
    }

    /// Any key other than Ctrl-Q restores the full confirmation count.
    pub fn reset_quit_confirmations(&mut self) {
        self.quit_remaining = self.settings.quit_times;
    }
}
