//! Key handling for the editor session.
//!
//! Input flows through two stages:
//! 1. `translate_key` maps a logical key to an `Action` (idle editing only).
//! 2. `dispatch` applies the action to an `EditorModel`.
//!
//! While a prompt is open (search or save-as) keys bypass translation and go
//! straight to the prompt handler, which owns the message bar until the
//! prompt is confirmed or abandoned.

mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch, dispatch_action};
pub use io_ops::{OpenError, SaveError, open_document, read_lines, write_document};
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertByte(u8),
    InsertNewline,
    /// Delete the byte before the cursor, merging lines at column 0.
    Backspace,
    /// Delete the byte under the cursor (move right, then backspace).
    DeleteUnder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Save,
    Quit,
    Find,
    /// Recognised key with no effect beyond a redraw (Ctrl-L, stray Escape).
    Refresh,
}
