//! Save, quit and search commands.

use std::path::Path;

use super::DispatchResult;
use crate::io_ops::write_document;
use core_model::{EditorModel, Prompt};
use core_search::SearchSession;

/// Save to the bound file name, or open the save-as prompt when there is none.
pub(crate) fn handle_save(model: &mut EditorModel) -> DispatchResult {
    match model.file_name().map(Path::to_path_buf) {
        Some(path) => save_to(model, &path),
        None => model.open_prompt(Prompt::SaveAs(String::new())),
    }
    DispatchResult::dirty()
}

/// Write the document to `path` and report the outcome in the status bar.
pub(crate) fn save_to(model: &mut EditorModel, path: &Path) {
    match write_document(model.document_mut(), path) {
        Ok(bytes) => {
            tracing::info!(target: "actions.dispatch", path = %path.display(), bytes, "saved");
            model.set_status(format!("{bytes} bytes written to disk"));
        }
        Err(e) => model.set_status(format!("Can't save! I/O error: {e}")),
    }
}

/// Quit immediately when unmodified; otherwise require `quit_times` extra presses.
pub(crate) fn handle_quit(model: &mut EditorModel) -> DispatchResult {
    let remaining = model.quit_confirmations_remaining();
    if model.document().is_modified() && remaining > 0 {
        model.set_status(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {remaining} more times to quit."
        ));
        model.consume_quit_confirmation();
        tracing::debug!(target: "actions.dispatch", remaining, "quit_blocked");
        return DispatchResult::dirty();
    }
    tracing::info!(target: "actions.dispatch", "quit");
    DispatchResult::quit()
}

pub(crate) fn handle_find(model: &mut EditorModel) -> DispatchResult {
    model.open_prompt(Prompt::Search(SearchSession::new()));
    DispatchResult::dirty()
}
