//! Single left-to-right classification pass over one line of display text.
//!
//! Rule order at each position (first match wins):
//! 1. single-line comment marker -> rest of line `Comment`
//! 2. block comment body / end marker / start marker -> `BlockComment`
//! 3. string body or opening quote -> `String`
//! 4. digit after a separator or number, `.` after a number -> `Number`
//! 5. keyword at a separator boundary -> `Keyword1` / `Keyword2`
//! 6. otherwise `Normal`, updating the separator flag

use crate::profile::{HighlightFlags, KeywordTier, LanguageProfile};
use crate::Highlight;

/// Punctuation that bounds keywords and numbers (alongside whitespace and NUL).
pub const SEPARATOR_PUNCTUATION: &[u8] = b",.()+-/*=~%<>[];";

#[inline]
pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0 || SEPARATOR_PUNCTUATION.contains(&b)
}

/// Output of one line scan. `classes.len()` always equals the scanned text length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineHighlight {
    pub classes: Vec<Highlight>,
    /// True when the line ends inside an unterminated block comment.
    pub ends_in_comment: bool,
}

/// Classify every byte of `text`.
///
/// `starts_in_comment` is the previous line's `ends_in_comment`. With no
/// profile every cell is `Normal` and no comment state is carried.
pub fn highlight_line(
    text: &[u8],
    profile: Option<&LanguageProfile>,
    starts_in_comment: bool,
) -> LineHighlight {
    let mut classes = vec![Highlight::Normal; text.len()];
    let Some(profile) = profile else {
        return LineHighlight {
            classes,
            ends_in_comment: false,
        };
    };

    let flags = profile.flags();
    let single = profile.single_line_comment();
    let block = profile.block_comment();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment && block.is_some();

    let mut i = 0;
    while i < text.len() {
        let c = text[i];
        let prev_hl = if i > 0 {
            classes[i - 1]
        } else {
            Highlight::Normal
        };

        if let Some(marker) = single
            && in_string.is_none()
            && !in_comment
            && text[i..].starts_with(marker)
        {
            classes[i..].fill(Highlight::Comment);
            break;
        }

        if let Some((start, end)) = block
            && in_string.is_none()
        {
            if in_comment {
                classes[i] = Highlight::BlockComment;
                if text[i..].starts_with(end) {
                    classes[i..i + end.len()].fill(Highlight::BlockComment);
                    i += end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    i += 1;
                }
                continue;
            } else if text[i..].starts_with(start) {
                classes[i..i + start.len()].fill(Highlight::BlockComment);
                i += start.len();
                in_comment = true;
                continue;
            }
        }

        if flags.contains(HighlightFlags::STRINGS) {
            if let Some(quote) = in_string {
                classes[i] = Highlight::String;
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                classes[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if flags.contains(HighlightFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            classes[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = keyword_at(profile, &text[i..]) {
            classes[i..i + len].fill(class);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    LineHighlight {
        classes,
        ends_in_comment: in_comment,
    }
}

/// First keyword (declaration order) that `rest` starts with and that is
/// followed by a separator or the end of the line.
fn keyword_at(profile: &LanguageProfile, rest: &[u8]) -> Option<(usize, Highlight)> {
    profile.keywords().iter().find_map(|kw| {
        let word = kw.text();
        let bounded = rest.starts_with(word) && rest.get(word.len()).is_none_or(|&b| is_separator(b));
        bounded.then(|| {
            let class = match kw.tier() {
                KeywordTier::Primary => Highlight::Keyword1,
                KeywordTier::Secondary => Highlight::Keyword2,
            };
            (word.len(), class)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin_registry;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use Highlight::*;

    fn c() -> Arc<LanguageProfile> {
        builtin_registry().select("t.c").expect("c profile")
    }

    fn scan(text: &str) -> Vec<Highlight> {
        highlight_line(text.as_bytes(), Some(&c()), false).classes
    }

    #[test]
    fn no_profile_is_all_normal() {
        let out = highlight_line(b"/* if 1 */", None, true);
        assert_eq!(out.classes, vec![Normal; 10]);
        assert!(!out.ends_in_comment);
    }

    #[test]
    fn keyword_requires_trailing_separator() {
        assert!(scan("ifstatement").iter().all(|&h| h == Normal));
        assert_eq!(&scan("if (")[..3], &[Keyword1, Keyword1, Normal]);
    }

    #[test]
    fn keyword_requires_leading_separator() {
        assert!(scan("xif ").iter().all(|&h| h == Normal));
    }

    #[test]
    fn keyword_at_end_of_line_and_tier_two() {
        assert_eq!(scan("return"), vec![Keyword1; 6]);
        assert_eq!(scan("int x;")[..3], [Keyword2; 3]);
    }

    #[test]
    fn numbers_need_boundary() {
        assert_eq!(scan("x = 3.14;"), vec![
            Normal, Normal, Normal, Normal, Number, Number, Number, Number, Normal
        ]);
        assert!(scan("abc123").iter().all(|&h| h == Normal));
    }

    #[test]
    fn strings_close_on_matching_quote_only() {
        let out = scan("\"a'b\" 1");
        assert_eq!(out[..5], [String; 5]);
        assert_eq!(out[5], Normal);
        // separator flag set after the string so the digit is a number
        assert_eq!(out[6], Number);
    }

    #[test]
    fn comment_markers_inside_string_are_text() {
        let out = scan("\"//\" /* x");
        assert_eq!(out[..4], [String; 4]);
        assert_eq!(out[5..], [BlockComment; 4]);
    }

    #[test]
    fn single_line_comment_takes_rest_of_line() {
        let out = highlight_line(b"x; // if 1 /*", Some(&c()), false);
        assert_eq!(out.classes[..3], [Normal; 3]);
        assert!(out.classes[3..].iter().all(|&h| h == Comment));
        assert!(!out.ends_in_comment);
    }

    #[test]
    fn block_comment_open_carries_state() {
        let out = highlight_line(b"/* start", Some(&c()), false);
        assert!(out.classes.iter().all(|&h| h == BlockComment));
        assert!(out.ends_in_comment);

        let out = highlight_line(b"still in comment", Some(&c()), true);
        assert!(out.classes.iter().all(|&h| h == BlockComment));
        assert!(out.ends_in_comment);
    }

    #[test]
    fn block_comment_closes_exactly_at_marker() {
        let out = highlight_line(b"end */ code", Some(&c()), true);
        assert_eq!(out.classes[..6], [BlockComment; 6]);
        assert!(out.classes[6..].iter().all(|&h| h == Normal));
        assert!(!out.ends_in_comment);
    }

    #[test]
    fn keyword_directly_after_block_comment_end() {
        let out = highlight_line(b"*/if(", Some(&c()), true);
        assert_eq!(out.classes, vec![
            BlockComment, BlockComment, Keyword1, Keyword1, Normal
        ]);
    }

    #[test]
    fn classes_length_matches_text() {
        for text in ["", "\"unterminated", "/*", "1.2.3", "    int main(void) {"] {
            assert_eq!(scan(text).len(), text.len(), "{text:?}");
        }
    }

    #[test]
    fn profile_without_flags_skips_strings_and_numbers() {
        let plain = LanguageProfile::new("plain").with_keywords(["let"]);
        let out = highlight_line(b"let s = \"1\"", Some(&plain), false);
        assert_eq!(out.classes[..3], [Keyword1; 3]);
        assert!(out.classes[3..].iter().all(|&h| h == Normal));
    }
}
