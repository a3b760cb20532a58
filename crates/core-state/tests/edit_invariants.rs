//! Randomized edit sequences must leave every line's caches consistent with a
//! from-scratch classification of the whole document.

use core_state::Document;
use core_syntax::{builtin_registry, highlight_line};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    InsertChar { line: usize, col: usize, byte: u8 },
    DeleteChar { line: usize, col: usize },
    Split { line: usize, col: usize },
    Merge { line: usize },
    InsertLine { line: usize, text: Vec<u8> },
    DeleteLine { line: usize },
}

fn byte() -> impl Strategy<Value = u8> {
    prop::sample::select(b"/*\"' \tab1.;if".to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..12, 0usize..24, byte()).prop_map(|(line, col, byte)| Op::InsertChar { line, col, byte }),
        2 => (0usize..12, 0usize..24).prop_map(|(line, col)| Op::DeleteChar { line, col }),
        1 => (0usize..12, 0usize..24).prop_map(|(line, col)| Op::Split { line, col }),
        1 => (0usize..12).prop_map(|line| Op::Merge { line }),
        1 => (0usize..12, prop::collection::vec(byte(), 0..10)).prop_map(|(line, text)| Op::InsertLine { line, text }),
        1 => (0usize..12).prop_map(|line| Op::DeleteLine { line }),
    ]
}

fn apply(doc: &mut Document, op: &Op) {
    match op {
        Op::InsertChar { line, col, byte } => {
            doc.insert_character(*line, *col, *byte);
        }
        Op::DeleteChar { line, col } => {
            doc.delete_character(*line, *col);
        }
        Op::Split { line, col } => {
            doc.split_line(*line, *col);
        }
        Op::Merge { line } => {
            doc.merge_line_up(*line);
        }
        Op::InsertLine { line, text } => {
            doc.insert_line(*line, text.clone());
        }
        Op::DeleteLine { line } => doc.delete_line(*line),
    }
}

fn assert_consistent(doc: &Document) -> Result<(), TestCaseError> {
    let mut open = false;
    for (i, line) in doc.lines().enumerate() {
        prop_assert_eq!(line.index(), i);
        prop_assert_eq!(line.display_len(), line.classes().len());
        let fresh = highlight_line(line.display(), doc.profile(), open);
        prop_assert_eq!(line.classes(), fresh.classes.as_slice(), "line {}", i);
        prop_assert_eq!(line.ends_in_open_comment(), fresh.ends_in_comment, "line {}", i);
        open = fresh.ends_in_comment;
    }
    Ok(())
}

proptest! {
    #[test]
    fn caches_never_desynchronize(ops in prop::collection::vec(op(), 1..60)) {
        let mut doc = Document::from_lines(
            [b"/* seed".to_vec(), b"int x = 1;".to_vec(), b"*/ if (y)".to_vec()],
            8,
            builtin_registry().select("prop.c"),
        );
        for op in &ops {
            apply(&mut doc, op);
            assert_consistent(&doc)?;
        }
    }

    #[test]
    fn overlay_never_survives_a_line_edit(col in 0usize..8, byte in byte()) {
        let mut doc = Document::from_lines([b"foo bar".to_vec()], 8, builtin_registry().select("o.c"));
        doc.set_match_overlay(0, 0..3);
        doc.insert_character(0, col, byte);
        prop_assert_eq!(doc.overlay_line(), None);
        assert_consistent(&doc)?;
    }
}
