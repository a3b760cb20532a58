//! Idle-mode key bindings.

use crate::{Action, EditKind, MotionKind};
use core_events::{KeyCode, KeyEvent};

/// Map `key` to the action it triggers while no prompt is open. Keys with no
/// binding (Ctrl-letters other than the commands below, Alt-chords, non-ASCII
/// characters) yield `None`.
pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    if let Some(letter) = key.ctrl_letter() {
        return match letter {
            'q' => Some(Action::Quit),
            's' => Some(Action::Save),
            'f' => Some(Action::Find),
            'h' => Some(Action::Edit(EditKind::Backspace)),
            'l' => Some(Action::Refresh),
            _ => None,
        };
    }
    if let Some(byte) = key.text_byte() {
        return Some(Action::Edit(EditKind::InsertByte(byte)));
    }
    let action = match key.code {
        KeyCode::Enter => Action::Edit(EditKind::InsertNewline),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::DeleteUnder),
        KeyCode::Esc => Action::Refresh,
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Home => Action::Motion(MotionKind::LineStart),
        KeyCode::End => Action::Motion(MotionKind::LineEnd),
        KeyCode::PageUp => Action::Motion(MotionKind::PageUp),
        KeyCode::PageDown => Action::Motion(MotionKind::PageDown),
        KeyCode::Char(_) | KeyCode::Tab => return None,
    };
    Some(action)
}
