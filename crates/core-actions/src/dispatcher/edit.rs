//! Text mutation at the cursor.

use super::DispatchResult;
use super::motion::step;
use crate::{EditKind, MotionKind};
use core_model::EditorModel;

pub(crate) fn handle_edit(kind: EditKind, model: &mut EditorModel) -> DispatchResult {
    match kind {
        EditKind::InsertByte(byte) => insert_byte(model, byte),
        EditKind::InsertNewline => insert_newline(model),
        EditKind::Backspace => {
            if !backspace(model) {
                return DispatchResult::clean();
            }
        }
        EditKind::DeleteUnder => {
            let (doc, cursor) = model.document_and_cursor_mut();
            let before = *cursor;
            step(MotionKind::Right, doc, cursor);
            if *cursor == before {
                return DispatchResult::clean();
            }
            backspace(model);
        }
    }
    DispatchResult::dirty()
}

/// Typing on the virtual line past the end appends a real line first.
fn insert_byte(model: &mut EditorModel, byte: u8) {
    let (doc, cursor) = model.document_and_cursor_mut();
    if cursor.line >= doc.line_count() {
        cursor.line = doc.insert_line(doc.line_count(), Vec::new());
    }
    let (line, col) = doc.insert_character(cursor.line, cursor.byte, byte);
    cursor.line = line;
    cursor.byte = col + 1;
}

fn insert_newline(model: &mut EditorModel) {
    let (doc, cursor) = model.document_and_cursor_mut();
    if cursor.line >= doc.line_count() {
        doc.insert_line(doc.line_count(), Vec::new());
        cursor.line = doc.line_count();
    } else if cursor.byte == 0 {
        doc.insert_line(cursor.line, Vec::new());
        cursor.line += 1;
    } else {
        cursor.line = doc.split_line(cursor.line, cursor.byte);
    }
    cursor.byte = 0;
}

/// Delete the byte before the cursor or merge the cursor line into the
/// previous one. Returns false when there was nothing to delete.
fn backspace(model: &mut EditorModel) -> bool {
    let (doc, cursor) = model.document_and_cursor_mut();
    if cursor.line >= doc.line_count() || (cursor.line == 0 && cursor.byte == 0) {
        return false;
    }
    if cursor.byte > 0 {
        if doc.delete_character(cursor.line, cursor.byte - 1).is_none() {
            return false;
        }
        cursor.byte -= 1;
        return true;
    }
    match doc.merge_line_up(cursor.line) {
        Some((prev, join_col)) => {
            cursor.line = prev;
            cursor.byte = join_col;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Settings;
    use core_state::Document;
    use core_text::Position;

    fn model(lines: &[&str], cursor: Position) -> EditorModel {
        let doc = Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 8, None);
        let mut m = EditorModel::new(doc, Settings::default());
        m.set_cursor(cursor);
        m
    }

    fn text(m: &EditorModel) -> Vec<u8> {
        m.document().to_bytes()
    }

    #[test]
    fn typing_on_virtual_line_appends() {
        let mut m = model(&["a"], Position::new(1, 0));
        handle_edit(EditKind::InsertByte(b'b'), &mut m);
        assert_eq!(text(&m), b"a\nb\n");
        assert_eq!(m.cursor(), Position::new(1, 1));
    }

    #[test]
    fn typing_into_empty_document() {
        let mut m = model(&[], Position::origin());
        handle_edit(EditKind::InsertByte(b'x'), &mut m);
        assert_eq!(text(&m), b"x\n");
        assert_eq!(m.cursor(), Position::new(0, 1));
    }

    #[test]
    fn newline_splits_and_opens_lines() {
        let mut m = model(&["hello"], Position::new(0, 2));
        handle_edit(EditKind::InsertNewline, &mut m);
        assert_eq!(text(&m), b"he\nllo\n");
        assert_eq!(m.cursor(), Position::new(1, 0));

        handle_edit(EditKind::InsertNewline, &mut m);
        assert_eq!(text(&m), b"he\n\nllo\n");
        assert_eq!(m.cursor(), Position::new(2, 0));

        m.set_cursor(Position::new(3, 0));
        handle_edit(EditKind::InsertNewline, &mut m);
        assert_eq!(text(&m), b"he\n\nllo\n\n");
        assert_eq!(m.cursor(), Position::new(4, 0));
    }

    #[test]
    fn backspace_merges_at_line_start() {
        let mut m = model(&["ab", "cd"], Position::new(1, 0));
        handle_edit(EditKind::Backspace, &mut m);
        assert_eq!(text(&m), b"abcd\n");
        assert_eq!(m.cursor(), Position::new(0, 2));
    }

    #[test]
    fn backspace_at_origin_and_virtual_line_is_noop() {
        let mut m = model(&["ab"], Position::origin());
        assert_eq!(handle_edit(EditKind::Backspace, &mut m), DispatchResult::clean());
        m.set_cursor(Position::new(1, 0));
        assert_eq!(handle_edit(EditKind::Backspace, &mut m), DispatchResult::clean());
        assert!(!m.document().is_modified());
    }

    #[test]
    fn delete_under_removes_byte_and_joins_lines() {
        let mut m = model(&["ab", "cd"], Position::new(0, 0));
        handle_edit(EditKind::DeleteUnder, &mut m);
        assert_eq!(text(&m), b"b\ncd\n");
        assert_eq!(m.cursor(), Position::new(0, 0));

        m.set_cursor(Position::new(0, 1));
        handle_edit(EditKind::DeleteUnder, &mut m);
        assert_eq!(text(&m), b"bcd\n");
        assert_eq!(m.cursor(), Position::new(0, 1));
    }

    #[test]
    fn delete_under_at_end_of_last_line_consumes_nothing() {
        let mut m = model(&["ab"], Position::new(0, 2));
        // moves onto the virtual line, where backspace has nothing to remove
        handle_edit(EditKind::DeleteUnder, &mut m);
        assert!(!m.document().is_modified());
        assert_eq!(text(&m), b"ab\n");
        assert_eq!(m.cursor(), Position::new(1, 0));
    }
}
