//! Keys routed to an open prompt.
//!
//! The prompt is taken out of the model for the duration of a key so the
//! search session can borrow the document and cursor; it is put back unless
//! the key closed it.

use std::path::PathBuf;

use super::DispatchResult;
use super::command::save_to;
use core_events::{KeyCode, KeyEvent};
use core_model::{EditorModel, Prompt};
use core_search::SearchSession;

enum PromptKey {
    Cancel,
    Confirm,
    Erase,
    Next,
    Previous,
    Text(u8),
    Ignored,
}

fn classify(key: &KeyEvent) -> PromptKey {
    if key.ctrl_letter() == Some('h') {
        return PromptKey::Erase;
    }
    match key.code {
        KeyCode::Esc => PromptKey::Cancel,
        KeyCode::Enter => PromptKey::Confirm,
        KeyCode::Backspace | KeyCode::Delete => PromptKey::Erase,
        KeyCode::Right | KeyCode::Down => PromptKey::Next,
        KeyCode::Left | KeyCode::Up => PromptKey::Previous,
        _ => match key.text_byte() {
            Some(b) if b != b'\t' => PromptKey::Text(b),
            _ => PromptKey::Ignored,
        },
    }
}

pub(crate) fn handle_prompt_key(key: &KeyEvent, model: &mut EditorModel) -> DispatchResult {
    let Some(prompt) = model.take_prompt() else {
        return DispatchResult::clean();
    };
    let reopened = match prompt {
        Prompt::Search(session) => search_key(classify(key), session, model),
        Prompt::SaveAs(name) => save_as_key(classify(key), name, model),
    };
    if let Some(prompt) = reopened {
        model.open_prompt(prompt);
    }
    DispatchResult::dirty()
}

fn search_key(
    key: PromptKey,
    mut session: SearchSession,
    model: &mut EditorModel,
) -> Option<Prompt> {
    let (doc, cursor) = model.document_and_cursor_mut();
    match key {
        PromptKey::Cancel => {
            session.cancel(doc);
            model.clear_status();
            return None;
        }
        PromptKey::Confirm => {
            session.confirm(doc);
            model.clear_status();
            return None;
        }
        PromptKey::Erase => {
            session.pop(doc, cursor);
        }
        PromptKey::Next => {
            session.find_next(doc, cursor);
        }
        PromptKey::Previous => {
            session.find_previous(doc, cursor);
        }
        PromptKey::Text(b) => {
            session.push(b, doc, cursor);
        }
        PromptKey::Ignored => {}
    }
    Some(Prompt::Search(session))
}

fn save_as_key(key: PromptKey, mut name: String, model: &mut EditorModel) -> Option<Prompt> {
    match key {
        PromptKey::Cancel => {
            model.set_status("Save aborted");
            return None;
        }
        PromptKey::Confirm if !name.is_empty() => {
            let path = PathBuf::from(name);
            model.rename(path.clone());
            save_to(model, &path);
            return None;
        }
        PromptKey::Erase => {
            name.pop();
        }
        PromptKey::Text(b) => name.push(char::from(b)),
        PromptKey::Confirm | PromptKey::Next | PromptKey::Previous | PromptKey::Ignored => {}
    }
    Some(Prompt::SaveAs(name))
}
