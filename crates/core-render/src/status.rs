//! Status bar and message bar composition.
//!
//! Status bar layout: `<name> - <N> lines [(modified)]` on the left and
//! `<filetype> | <line>/<total>` flush right. The left part is truncated to
//! the screen width; the right part is shown only when it fits exactly into
//! the remaining space.

use core_state::DocumentSummary;
use std::path::Path;

/// Longest filename prefix shown in the status bar.
pub const MAX_NAME_CHARS: usize = 20;

/// What the status bar needs to know about the session.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub file_name: Option<&'a Path>,
    pub file_type: Option<&'a str>,
    pub summary: DocumentSummary,
    /// 0-based cursor line (may equal `line_count`).
    pub cursor_line: usize,
}

pub fn left_status(ctx: &StatusContext<'_>) -> String {
    let name = ctx
        .file_name
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[No Name]".to_string());
    let name: String = name.chars().take(MAX_NAME_CHARS).collect();
    format!(
        "{name} - {} lines {}",
        ctx.summary.line_count,
        if ctx.summary.modified { "(modified)" } else { "" }
    )
}

pub fn right_status(ctx: &StatusContext<'_>) -> String {
    format!(
        "{} | {}/{}",
        ctx.file_type.unwrap_or("no ft"),
        ctx.cursor_line + 1,
        ctx.summary.line_count
    )
}

/// Full status bar text, exactly `width` characters wide.
pub fn compose_status(ctx: &StatusContext<'_>, width: usize) -> String {
    let mut bar: String = left_status(ctx).chars().take(width).collect();
    let right = right_status(ctx);
    let right_len = right.chars().count();
    let mut len = bar.chars().count();
    while len < width {
        if width - len == right_len {
            bar.push_str(&right);
            break;
        }
        bar.push(' ');
        len += 1;
    }
    bar
}

/// Message bar text: `message` cut to `width` characters.
pub fn compose_message(message: &str, width: usize) -> String {
    message.chars().take(width).collect()
}
