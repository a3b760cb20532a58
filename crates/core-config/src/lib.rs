//! Configuration loading and parsing.
//!
//! Reads `kilox.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_stop = 8        # clamped to 1..=16
//! quit_times = 3      # extra Ctrl-Q presses needed with unsaved changes
//!
//! [status]
//! message_timeout_secs = 5
//!
//! [[syntax]]
//! name = "python"
//! file_patterns = [".py"]
//! keywords = ["def", "return", "int|"]
//! single_line_comment = "#"
//! highlight_numbers = true
//! highlight_strings = true
//! ```
//!
//! Missing files and parse errors both fall back to defaults; a parse error
//! is logged at `warn`. Unknown fields are ignored.

use anyhow::Result;
use core_syntax::{HighlightFlags, LanguageProfile, ProfileRegistry};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "kilox.toml";
pub const MIN_TAB_STOP: usize = 1;
pub const MAX_TAB_STOP: usize = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        8
    }
    const fn default_quit_times() -> u32 {
        3
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_timeout")]
    pub message_timeout_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_timeout_secs: Self::default_timeout(),
        }
    }
}

impl StatusConfig {
    const fn default_timeout() -> u64 {
        5
    }
}

/// One `[[syntax]]` table.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SyntaxEntry {
    pub name: String,
    #[serde(default)]
    pub file_patterns: Vec<String>,
    /// Trailing `|` marks a secondary-tier keyword.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub single_line_comment: String,
    #[serde(default)]
    pub block_comment_start: String,
    #[serde(default)]
    pub block_comment_end: String,
    #[serde(default)]
    pub highlight_numbers: bool,
    #[serde(default)]
    pub highlight_strings: bool,
}

impl SyntaxEntry {
    pub fn to_profile(&self) -> LanguageProfile {
        let mut flags = HighlightFlags::empty();
        flags.set(HighlightFlags::NUMBERS, self.highlight_numbers);
        flags.set(HighlightFlags::STRINGS, self.highlight_strings);
        LanguageProfile::new(self.name.clone())
            .with_patterns(self.file_patterns.iter().cloned())
            .with_keywords(&self.keywords)
            .with_single_line_comment(&self.single_line_comment)
            .with_block_comment(&self.block_comment_start, &self.block_comment_end)
            .with_flags(flags)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub syntax: Vec<SyntaxEntry>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file: ConfigFile,
    pub effective_tab_stop: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(ConfigFile::default())
    }
}

/// Config path: `./kilox.toml` when present, else the platform config dir
/// (`<config_dir>/kilox/kilox.toml`), else the bare relative name.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("kilox").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                syntax_entries = file.syntax.len(),
                "config_loaded"
            );
            Ok(Config::from_file(file))
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error");
            Ok(Config::default())
        }
    }
}

impl Config {
    fn from_file(file: ConfigFile) -> Self {
        let requested = file.editor.tab_stop;
        let effective_tab_stop = requested.clamp(MIN_TAB_STOP, MAX_TAB_STOP);
        if effective_tab_stop != requested {
            info!(
                target: "config",
                raw = requested,
                clamped = effective_tab_stop,
                "tab_stop_clamped"
            );
        }
        Self {
            file,
            effective_tab_stop,
        }
    }

    pub fn quit_times(&self) -> u32 {
        self.file.editor.quit_times
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.status.message_timeout_secs)
    }

    /// Built-in profiles followed by every configured `[[syntax]]` entry.
    pub fn profile_registry(&self) -> ProfileRegistry {
        ProfileRegistry::builtin().with_profiles(self.file.syntax.iter().map(SyntaxEntry::to_profile))
    }
}
