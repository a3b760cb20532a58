//! Logical input events consumed by the editor core.
//!
//! Escape-sequence decoding happens outside the core (see `core-input`);
//! by the time an event lands here it is one of a closed set of keys plus an
//! optional Ctrl modifier. An incomplete escape sequence is delivered as a
//! bare `KeyCode::Esc`, which every consumer must tolerate.

use std::fmt;

/// Normalized input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Ctrl + letter (stored lowercase).
    pub const fn ctrl(letter: char) -> Self {
        Self::new(
            KeyCode::Char(letter.to_ascii_lowercase()),
            KeyModifiers::CTRL,
        )
    }

    /// `Some(letter)` when this is a Ctrl-modified letter.
    pub fn ctrl_letter(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.mods.contains(KeyModifiers::CTRL) && c.is_ascii_alphabetic() => {
                Some(c.to_ascii_lowercase())
            }
            _ => None,
        }
    }

    /// The byte this key inserts as text, if any: printable ASCII or tab,
    /// without Ctrl/Alt.
    pub fn text_byte(&self) -> Option<u8> {
        if self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) {
            return None;
        }
        match self.code {
            KeyCode::Char(c) if c.is_ascii() && !c.is_ascii_control() => Some(c as u8),
            KeyCode::Tab => Some(b'\t'),
            _ => None,
        }
    }
}

/// Closed set of logical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT = 0b0000_0010;
        const SHIFT = 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.ctrl_letter() {
            return write!(f, "<C-{c}>");
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "<{other:?}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        assert_eq!(KeyEvent::ctrl('Q').to_string(), "<C-q>");
        assert_eq!(KeyEvent::plain(KeyCode::Char('x')).to_string(), "x");
        assert_eq!(KeyEvent::plain(KeyCode::PageUp).to_string(), "<PageUp>");
    }

    #[test]
    fn ctrl_letter_only_for_letters() {
        assert_eq!(KeyEvent::ctrl('s').ctrl_letter(), Some('s'));
        let ctrl_digit = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CTRL);
        assert_eq!(ctrl_digit.ctrl_letter(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Char('s')).ctrl_letter(), None);
    }

    #[test]
    fn text_byte_filters_control_and_modified_keys() {
        assert_eq!(KeyEvent::plain(KeyCode::Char('a')).text_byte(), Some(b'a'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT).text_byte(),
            Some(b'A')
        );
        assert_eq!(KeyEvent::plain(KeyCode::Tab).text_byte(), Some(b'\t'));
        assert_eq!(KeyEvent::ctrl('a').text_byte(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Char('é')).text_byte(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Enter).text_byte(), None);
    }
}
