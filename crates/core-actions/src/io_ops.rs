//! File load / save helpers.
//!
//! Synchronous and whole-file: a load reads every byte, a save rewrites the
//! target in one call. Both speak raw bytes so files that are not valid
//! UTF-8 survive a round trip untouched.

use std::io;
use std::path::{Path, PathBuf};

use core_state::{Document, split_lines};
use core_syntax::ProfileRegistry;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("cannot open {path}: {source}")]
pub struct OpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl OpenError {
    /// True when the path simply does not exist yet (a new file).
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read `path` and split it into newline-stripped lines (`\r\n` tolerated).
pub fn read_lines(path: &Path) -> Result<Vec<Vec<u8>>, OpenError> {
    let bytes = std::fs::read(path).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
        OpenError {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let lines = split_lines(&bytes);
    tracing::debug!(
        target: "io",
        path = %path.display(),
        bytes = bytes.len(),
        lines = lines.len(),
        "file_open"
    );
    Ok(lines)
}

/// Load `path` into an unmodified document with the profile selected by its name.
pub fn open_document(
    path: &Path,
    registry: &ProfileRegistry,
    tab_stop: usize,
) -> Result<Document, OpenError> {
    let lines = read_lines(path)?;
    let profile = registry.select(&path.to_string_lossy());
    Ok(Document::from_lines(lines, tab_stop, profile))
}

/// Write `doc` to `path` (every line followed by `\n`), then reset its
/// modification counter. Returns the number of bytes written.
pub fn write_document(doc: &mut Document, path: &Path) -> Result<usize, SaveError> {
    let bytes = doc.to_bytes();
    std::fs::write(path, &bytes).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        SaveError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    doc.mark_saved();
    tracing::debug!(target: "io", path = %path.display(), bytes = bytes.len(), "file_write");
    Ok(bytes.len())
}
