//! Dispatcher applying keys and `Action`s to an `EditorModel`.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `edit`    - text mutation (insert / newline / backspace / delete)
//! * `command` - save, quit confirmation, opening the search prompt
//! * `prompt`  - keys routed to an open search or save-as prompt
//!
//! Every handler leaves the cursor inside the document and re-runs
//! `EditorModel::scroll`, so the caller can render straight away.

use crate::{Action, key_translator::translate_key};
use core_events::KeyEvent;
use core_model::EditorModel;

mod command;
mod edit;
mod motion;
mod prompt;

/// Result of dispatching a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Handle one logical key: an open prompt consumes it, otherwise it is
/// translated and applied as an `Action`.
pub fn dispatch(key: &KeyEvent, model: &mut EditorModel) -> DispatchResult {
    let result = if model.prompt().is_some() {
        model.reset_quit_confirmations();
        prompt::handle_prompt_key(key, model)
    } else {
        match translate_key(key) {
            Some(action) => dispatch_action(action, model),
            None => {
                tracing::trace!(target: "actions.dispatch", %key, "unbound_key");
                model.reset_quit_confirmations();
                DispatchResult::clean()
            }
        }
    };
    model.scroll();
    result
}

/// Apply an action. Any action other than `Quit` restores the quit
/// confirmation count.
pub fn dispatch_action(action: Action, model: &mut EditorModel) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", ?action, "dispatch");
    if action != Action::Quit {
        model.reset_quit_confirmations();
    }
    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, model),
        Action::Edit(kind) => edit::handle_edit(kind, model),
        Action::Save => command::handle_save(model),
        Action::Quit => command::handle_quit(model),
        Action::Find => command::handle_find(model),
        Action::Refresh => DispatchResult::dirty(),
    };
    model.scroll();
    result
}
