//! Document state: the line store and its derived caches.
//!
//! `Document` owns the ordered lines of one open file. Each `Line` carries
//! three views that must agree at all times:
//! * raw bytes (what is edited and saved),
//! * display bytes (tabs expanded),
//! * per-display-cell `Highlight` classes plus the "ends inside an open block
//!   comment" bit that seeds the next line's scan.
//!
//! Design notes:
//! * There is no dirty-but-unrendered state. Mutators recompute before
//!   returning and cascade comment state forward through a worklist rather
//!   than recursion, so a single unterminated comment at the top of a large
//!   file costs one pass and no stack depth.
//! * Bounds are clamped, never reported. Editing must tolerate cursor drift.
//! * The search match overlay is not cached: it is dropped whenever the
//!   overlaid line is reclassified, and clearing it reruns classification.

mod document;

pub use document::{Document, DocumentSummary, Line};

/// Split file content into newline-stripped lines.
///
/// Lines end at `\n`; one trailing `\r` per line is dropped so CRLF files
/// load cleanly. A final newline does not produce an extra empty line, and
/// empty input yields no lines.
pub fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_lines_strips_terminators() {
        assert_eq!(
            split_lines(b"a\r\nb\n\nc"),
            vec![b"a".to_vec(), b"b".to_vec(), Vec::new(), b"c".to_vec()]
        );
    }

    #[test]
    fn split_lines_trailing_newline_and_empty() {
        assert_eq!(split_lines(b"one\n"), vec![b"one".to_vec()]);
        assert_eq!(split_lines(b"\n"), vec![Vec::<u8>::new()]);
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn split_then_serialize_round_trip() {
        let content = b"int main() {\n\treturn 0;\n}\n";
        let doc = Document::from_lines(split_lines(content), 8, None);
        assert_eq!(doc.to_bytes(), content.to_vec());
    }
}
