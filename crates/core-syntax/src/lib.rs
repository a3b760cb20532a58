//! Per-line syntax classification driven by a fixed table of language profiles.
//!
//! The engine is deliberately line-local: `highlight_line` sees one line of
//! display text plus a single bit of carried state (whether the previous
//! line ended inside an open block comment) and returns a classification for
//! every display cell together with the state to hand to the next line.
//! Propagating that bit across a document is the caller's job (see the
//! `Document` worklist in `core-state`).

mod profile;
mod scan;

pub use profile::{
    HighlightFlags, Keyword, KeywordTier, LanguageProfile, ProfileRegistry, builtin_registry,
};
pub use scan::{LineHighlight, SEPARATOR_PUNCTUATION, highlight_line, is_separator};

/// Highlight category of a single display cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    BlockComment,
    Keyword1,
    Keyword2,
    String,
    Number,
    /// Transient search overlay; never produced by `highlight_line`.
    Match,
}
