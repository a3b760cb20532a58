//! Language profiles and the registry they are selected from.
//!
//! Profiles are immutable once built. The registry is assembled at startup
//! (built-in table first, configured extras after) and only read afterwards;
//! selection returns a shared handle so every document opened with the same
//! profile points at one keyword table.

use bitflags::bitflags;
use std::sync::{Arc, LazyLock};

bitflags! {
    /// Optional highlighting features a profile can switch on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HighlightFlags: u8 {
        const NUMBERS = 0b0000_0001;
        const STRINGS = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordTier {
    Primary,
    Secondary,
}

/// One keyword entry. Definitions ending in `|` are secondary tier
/// (`"int|"` -> `int`, secondary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    text: Vec<u8>,
    tier: KeywordTier,
}

impl Keyword {
    pub fn parse(definition: &str) -> Self {
        match definition.strip_suffix('|') {
            Some(text) => Self {
                text: text.as_bytes().to_vec(),
                tier: KeywordTier::Secondary,
            },
            None => Self {
                text: definition.as_bytes().to_vec(),
                tier: KeywordTier::Primary,
            },
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn tier(&self) -> KeywordTier {
        self.tier
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    name: String,
    file_patterns: Vec<String>,
    keywords: Vec<Keyword>,
    single_line_comment: Option<Vec<u8>>,
    block_comment: Option<(Vec<u8>, Vec<u8>)>,
    flags: HighlightFlags,
}

impl LanguageProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_patterns: Vec::new(),
            keywords: Vec::new(),
            single_line_comment: None,
            block_comment: None,
            flags: HighlightFlags::empty(),
        }
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_patterns
            .extend(patterns.into_iter().map(Into::into).filter(|p| !p.is_empty()));
        self
    }

    /// Keyword definitions in match-priority order (see `Keyword::parse`).
    pub fn with_keywords<I, S>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(
            definitions
                .into_iter()
                .map(|d| Keyword::parse(d.as_ref()))
                .filter(|k| !k.text.is_empty()),
        );
        self
    }

    pub fn with_single_line_comment(mut self, marker: &str) -> Self {
        self.single_line_comment = (!marker.is_empty()).then(|| marker.as_bytes().to_vec());
        self
    }

    /// Both markers must be non-empty for block comments to be recognised.
    pub fn with_block_comment(mut self, start: &str, end: &str) -> Self {
        self.block_comment = (!start.is_empty() && !end.is_empty())
            .then(|| (start.as_bytes().to_vec(), end.as_bytes().to_vec()));
        self
    }

    pub fn with_flags(mut self, flags: HighlightFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_patterns(&self) -> &[String] {
        &self.file_patterns
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn single_line_comment(&self) -> Option<&[u8]> {
        self.single_line_comment.as_deref()
    }

    pub fn block_comment(&self) -> Option<(&[u8], &[u8])> {
        self.block_comment
            .as_ref()
            .map(|(s, e)| (s.as_slice(), e.as_slice()))
    }

    pub fn flags(&self) -> HighlightFlags {
        self.flags
    }

    /// Patterns starting with `.` must equal the filename's extension (from the
    /// last `.` inclusive); other patterns match anywhere in the filename.
    pub fn matches(&self, filename: &str) -> bool {
        let ext = filename.rfind('.').map(|i| &filename[i..]);
        self.file_patterns.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(pattern.as_str())
            } else {
                filename.contains(pattern.as_str())
            }
        })
    }
}

/// Ordered, read-only collection of profiles. Earlier entries win when several
/// profiles match the same filename.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<Arc<LanguageProfile>>,
}

impl ProfileRegistry {
    pub fn new(profiles: impl IntoIterator<Item = LanguageProfile>) -> Self {
        Self {
            profiles: profiles.into_iter().map(Arc::new).collect(),
        }
    }

    /// Built-in table (`c`, `rust`).
    pub fn builtin() -> Self {
        Self::new([c_profile(), rust_profile()])
    }

    /// Return a registry with `extra` appended after the existing entries.
    pub fn with_profiles(mut self, extra: impl IntoIterator<Item = LanguageProfile>) -> Self {
        self.profiles.extend(extra.into_iter().map(Arc::new));
        self
    }

    pub fn profiles(&self) -> impl Iterator<Item = &LanguageProfile> {
        self.profiles.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// First profile whose patterns match `filename`.
    pub fn select(&self, filename: &str) -> Option<Arc<LanguageProfile>> {
        let found = self.profiles.iter().find(|p| p.matches(filename)).cloned();
        tracing::debug!(
            target: "syntax",
            filename,
            profile = found.as_ref().map(|p| p.name()),
            "profile_select"
        );
        found
    }
}

static BUILTIN: LazyLock<ProfileRegistry> = LazyLock::new(ProfileRegistry::builtin);

/// Process-wide built-in table, built on first use and never mutated.
pub fn builtin_registry() -> &'static ProfileRegistry {
    &BUILTIN
}

fn c_profile() -> LanguageProfile {
    LanguageProfile::new("c")
        .with_patterns([".c", ".h", ".cpp"])
        .with_keywords([
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case", "int|", "long|", "double|",
            "float|", "char|", "unsigned|", "signed|", "void|",
        ])
        .with_single_line_comment("//")
        .with_block_comment("/*", "*/")
        .with_flags(HighlightFlags::NUMBERS | HighlightFlags::STRINGS)
}

fn rust_profile() -> LanguageProfile {
    LanguageProfile::new("rust")
        .with_patterns([".rs"])
        .with_keywords([
            "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
            "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
            "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
            "unsafe", "use", "where", "while", "i8|", "u8|", "i16|", "u16|", "i32|", "u32|",
            "i64|", "u64|", "isize|", "usize|", "f32|", "f64|", "bool|", "char|", "str|",
            "String|", "Vec|", "Option|", "Result|",
        ])
        .with_single_line_comment("//")
        .with_block_comment("/*", "*/")
        .with_flags(HighlightFlags::NUMBERS | HighlightFlags::STRINGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_tier_marker() {
        let k = Keyword::parse("int|");
        assert_eq!(k.text(), b"int");
        assert_eq!(k.tier(), KeywordTier::Secondary);
        let k = Keyword::parse("if");
        assert_eq!(k.text(), b"if");
        assert_eq!(k.tier(), KeywordTier::Primary);
    }

    #[test]
    fn extension_patterns_match_only_the_extension() {
        let reg = builtin_registry();
        assert_eq!(reg.select("main.c").unwrap().name(), "c");
        assert_eq!(reg.select("src/lib.rs").unwrap().name(), "rust");
        assert_eq!(reg.select("include/x.h").unwrap().name(), "c");
        assert!(reg.select("notes.txt").is_none());
        // ".c" must not match ".cs" or a mid-name occurrence
        assert!(reg.select("prog.cs").is_none());
        assert!(reg.select("a.c.txt").is_none());
        assert!(reg.select("Makefile").is_none());
    }

    #[test]
    fn non_extension_pattern_is_substring_match() {
        let make = LanguageProfile::new("make").with_patterns(["Makefile"]);
        assert!(make.matches("Makefile"));
        assert!(make.matches("sub/Makefile.am"));
        assert!(!make.matches("makefile"));
    }

    #[test]
    fn earlier_registry_entries_win() {
        let shadow = LanguageProfile::new("shadow").with_patterns([".c"]);
        let reg = ProfileRegistry::builtin().with_profiles([shadow]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.select("x.c").unwrap().name(), "c");
        let reg = ProfileRegistry::new([LanguageProfile::new("shadow").with_patterns([".c"])]);
        assert_eq!(reg.select("x.c").unwrap().name(), "shadow");
    }

    #[test]
    fn empty_markers_disable_comment_rules() {
        let p = LanguageProfile::new("p")
            .with_single_line_comment("")
            .with_block_comment("/*", "");
        assert!(p.single_line_comment().is_none());
        assert!(p.block_comment().is_none());
    }
}
