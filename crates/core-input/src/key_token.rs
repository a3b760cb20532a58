use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event onto the logical key set.
///
/// Returns `None` for releases and for keys the editor has no binding for
/// (function keys, media keys, lone modifiers).
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    let code = map_key_code(&event.code)?;
    Some(KeyEvent::new(code, map_modifiers(event.modifiers)))
}

pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Insert
        | CKeyCode::F(_)
        | CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => return None,
    };
    Some(code)
}

pub(crate) fn map_modifiers(mods: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: CKeyCode, mods: CKeyModifiers) -> CKeyEvent {
        CKeyEvent::new(code, mods)
    }

    #[test]
    fn ctrl_letter_keeps_control_bit() {
        let ev = map_key_event(&press(CKeyCode::Char('q'), CKeyModifiers::CONTROL)).unwrap();
        assert_eq!(ev, KeyEvent::ctrl('q'));
    }

    #[test]
    fn releases_are_dropped() {
        let ev = CKeyEvent {
            code: CKeyCode::Char('a'),
            modifiers: CKeyModifiers::NONE,
            kind: CKeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key_event(&ev), None);
    }

    #[test]
    fn unbound_keys_are_dropped() {
        assert_eq!(map_key_code(&CKeyCode::F(5)), None);
        assert_eq!(map_key_code(&CKeyCode::Insert), None);
        assert_eq!(map_key_code(&CKeyCode::BackTab), Some(KeyCode::Tab));
    }
}
