//! Cursor movement.
//!
//! Horizontal moves wrap across line boundaries; vertical moves keep the raw
//! column and clamp it to the target line. The cursor may rest on the
//! virtual line just past the last one.

use super::DispatchResult;
use crate::MotionKind;
use core_model::EditorModel;
use core_state::Document;
use core_text::Position;

pub(crate) fn handle_motion(kind: MotionKind, model: &mut EditorModel) -> DispatchResult {
    let before = model.cursor();
    match kind {
        MotionKind::PageUp | MotionKind::PageDown => page(kind, model),
        _ => {
            let mut cursor = before;
            step(kind, model.document(), &mut cursor);
            model.set_cursor(cursor);
        }
    }
    if model.cursor() == before {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}

/// Apply one non-paging motion to `cursor`.
pub(crate) fn step(kind: MotionKind, doc: &Document, cursor: &mut Position) {
    let line_count = doc.line_count();
    match kind {
        MotionKind::Left => {
            if cursor.byte > 0 {
                cursor.byte -= 1;
            } else if cursor.line > 0 {
                cursor.line -= 1;
                cursor.byte = doc.line_len(cursor.line);
            }
        }
        MotionKind::Right => {
            if cursor.line < line_count {
                if cursor.byte < doc.line_len(cursor.line) {
                    cursor.byte += 1;
                } else {
                    cursor.line += 1;
                    cursor.byte = 0;
                }
            }
        }
        MotionKind::Up => cursor.line = cursor.line.saturating_sub(1),
        MotionKind::Down => {
            if cursor.line < line_count {
                cursor.line += 1;
            }
        }
        MotionKind::LineStart => cursor.byte = 0,
        MotionKind::LineEnd => {
            if cursor.line < line_count {
                cursor.byte = doc.line_len(cursor.line);
            }
        }
        MotionKind::PageUp | MotionKind::PageDown => {}
    }
    cursor.clamp_to(line_count, |line| doc.line_len(line));
}

/// Jump to the top / bottom text row, then move one screen further.
fn page(kind: MotionKind, model: &mut EditorModel) {
    let rows = model.text_rows();
    let mut cursor = model.cursor();
    let (direction, target) = if kind == MotionKind::PageUp {
        (MotionKind::Up, model.row_offset())
    } else {
        let bottom = (model.row_offset() + rows)
            .saturating_sub(1)
            .min(model.document().line_count());
        (MotionKind::Down, bottom)
    };
    cursor.line = target;
    let doc = model.document();
    cursor.clamp_to(doc.line_count(), |line| doc.line_len(line));
    for _ in 0..rows {
        step(direction, doc, &mut cursor);
    }
    model.set_cursor(cursor);
}
