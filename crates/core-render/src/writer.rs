//! Terminal writer: an ordered batch of primitive terminal commands.
//!
//! A frame is assembled into a `Writer` and emitted with one flush, so the
//! terminal never shows a half-drawn screen.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is written before `flush_to`.
//! * Positions are absolute with a (0,0) origin; callers ensure bounds.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    /// Clear from the cursor to the end of the current line.
    ClearLine,
    Print(String),
    /// Raw display bytes, written untouched (lines need not be UTF-8).
    Bytes(Vec<u8>),
    Foreground(Color),
    ResetColor,
    Reverse(bool),
    HideCursor,
    ShowCursor,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn bytes(&mut self, b: &[u8]) {
        if !b.is_empty() {
            self.cmds.push(Command::Bytes(b.to_vec()));
        }
    }
    pub fn foreground(&mut self, color: Option<Color>) {
        self.cmds.push(match color {
            Some(c) => Command::Foreground(c),
            None => Command::ResetColor,
        });
    }
    pub fn reverse(&mut self, on: bool) {
        self.cmds.push(Command::Reverse(on));
    }
    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }
    pub fn show_cursor(&mut self) {
        self.cmds.push(Command::ShowCursor);
    }

    /// Emit every command into `out` and flush it.
    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::UntilNewLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::Bytes(b) => out.write_all(&b)?,
                Command::Foreground(color) => queue!(out, SetForegroundColor(color))?,
                Command::ResetColor => queue!(out, ResetColor)?,
                Command::Reverse(true) => queue!(out, SetAttribute(Attribute::Reverse))?,
                Command::Reverse(false) => queue!(out, SetAttribute(Attribute::NoReverse))?,
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn flush(self) -> Result<()> {
        self.flush_to(&mut stdout().lock())
    }
}
