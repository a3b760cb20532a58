//! Frame composition.
//!
//! `render_frame` turns an `EditorModel` into one `Writer` batch:
//! 1. text rows (colored display bytes, `~` past the end, welcome banner on
//!    an empty document),
//! 2. the reverse-video status bar,
//! 3. the message bar (open prompt, else the status message until it expires),
//! 4. the cursor.
//!
//! The whole screen is redrawn every frame. Rows are addressed absolutely
//! and cleared to end of line, so leftovers from a longer previous frame
//! never survive.

pub mod status;
pub mod style;
pub mod writer;

use std::time::Instant;

use core_model::{EditorModel, VisibleRow};
use core_syntax::Highlight;

pub use status::{StatusContext, compose_message, compose_status};
pub use style::highlight_color;
pub use writer::{Command, Writer};

/// Banner shown one third down an empty document.
pub fn welcome_message() -> String {
    format!("kilox editor -- version {}", env!("CARGO_PKG_VERSION"))
}

pub fn render_frame(model: &EditorModel, now: Instant) -> Writer {
    let mut w = Writer::new();
    w.hide_cursor();

    let width = model.text_cols();
    let rows = model.visible_rows();
    let empty_doc = model.document().is_empty();
    for (y, row) in rows.iter().enumerate() {
        w.move_to(0, to_u16(y));
        match *row {
            VisibleRow::Text { display, classes } => draw_text(&mut w, display, classes),
            VisibleRow::Empty if empty_doc && y == rows.len() / 3 => draw_welcome(&mut w, width),
            VisibleRow::Empty => w.print("~"),
        }
        w.clear_line();
    }

    let status_row = to_u16(rows.len());
    let ctx = StatusContext {
        file_name: model.file_name(),
        file_type: model.file_type(),
        summary: model.document().summary(),
        cursor_line: model.cursor().line,
    };
    w.move_to(0, status_row);
    w.reverse(true);
    w.print(compose_status(&ctx, width));
    w.reverse(false);

    w.move_to(0, status_row.saturating_add(1));
    w.clear_line();
    let message = match model.prompt() {
        Some(prompt) => Some(prompt.render_text()),
        None => model.status_message(now).map(str::to_owned),
    };
    if let Some(message) = message {
        w.print(compose_message(&message, width));
    }

    let (col, row) = model.cursor_screen_position();
    w.move_to(col, row);
    w.show_cursor();
    tracing::trace!(target: "render", rows = rows.len(), commands = w.commands().len(), "frame");
    w
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Emit one row of display bytes, switching colors only when the class changes.
/// Control bytes are shown inverted as `@`+byte (`?` for DEL and above).
fn draw_text(w: &mut Writer, display: &[u8], classes: &[Highlight]) {
    let mut current: Option<Highlight> = None;
    let mut run: Vec<u8> = Vec::with_capacity(display.len());
    for (&b, &class) in display.iter().zip(classes) {
        if b.is_ascii_control() {
            w.bytes(&run);
            run.clear();
            let sym = if b <= 26 { char::from(b'@' + b) } else { '?' };
            w.reverse(true);
            w.print(sym.to_string());
            w.reverse(false);
            // restore the run color after the inverted cell
            if let Some(class) = current {
                w.foreground(highlight_color(class));
            }
            continue;
        }
        if current != Some(class) {
            w.bytes(&run);
            run.clear();
            w.foreground(highlight_color(class));
            current = Some(class);
        }
        run.push(b);
    }
    w.bytes(&run);
    w.foreground(None);
}

fn draw_welcome(w: &mut Writer, width: usize) {
    let banner: String = welcome_message().chars().take(width).collect();
    let mut padding = (width - banner.len()) / 2;
    let mut line = String::with_capacity(width);
    if padding > 0 {
        line.push('~');
        padding -= 1;
    }
    line.extend(std::iter::repeat_n(' ', padding));
    line.push_str(&banner);
    w.print(line);
}
