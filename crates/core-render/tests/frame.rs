use std::time::Instant;

use core_model::{EditorModel, Prompt, Settings};
use core_render::{Command, render_frame, welcome_message};
use core_state::Document;
use core_syntax::builtin_registry;
use core_text::Position;
use crossterm::style::Color;
use pretty_assertions::assert_eq;

fn model(lines: &[&[u8]], cols: u16, rows: u16) -> EditorModel {
    let doc = Document::from_lines(
        lines.iter().map(|l| l.to_vec()),
        8,
        builtin_registry().select("f.c"),
    );
    let mut m = EditorModel::new(doc, Settings::default()).with_file_name("f.c");
    m.set_screen_size(cols, rows);
    m.scroll();
    m
}

fn printed(cmds: &[Command]) -> Vec<String> {
    cmds.iter()
        .filter_map(|c| match c {
            Command::Print(s) => Some(s.clone()),
            Command::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            _ => None,
        })
        .collect()
}

#[test]
fn rows_past_end_show_tilde_and_status_bar_is_last_but_one() {
    let m = model(&[b"x"], 30, 6);
    let w = render_frame(&m, Instant::now());
    let text = printed(w.commands());
    assert_eq!(text.iter().filter(|s| s.as_str() == "~").count(), 3);
    let status = text.iter().find(|s| s.starts_with("f.c - 1 lines")).unwrap();
    assert_eq!(status.len(), 30);
    assert!(status.ends_with("c | 1/1"));
    assert!(w.commands().contains(&Command::MoveTo(0, 4)));
}

#[test]
fn status_bar_tracks_document_modification() {
    let mut m = model(&[b"x"], 40, 6);
    m.document_mut().insert_character(0, 0, b'y');
    let text = printed(render_frame(&m, Instant::now()).commands());
    assert!(text.iter().any(|s| s.starts_with("f.c - 1 lines (modified)")));

    m.document_mut().mark_saved();
    let text = printed(render_frame(&m, Instant::now()).commands());
    let status = text.iter().find(|s| s.starts_with("f.c - 1 lines")).unwrap();
    assert!(!status.contains("(modified)"));
}

#[test]
fn keywords_get_colored_runs() {
    let m = model(&[b"int x;"], 30, 4);
    let w = render_frame(&m, Instant::now());
    let cmds = w.commands();
    let green = cmds
        .iter()
        .position(|c| *c == Command::Foreground(Color::DarkGreen))
        .expect("keyword color");
    assert_eq!(cmds[green + 1], Command::Bytes(b"int".to_vec()));
    assert_eq!(cmds[green + 2], Command::ResetColor);
    assert_eq!(cmds[green + 3], Command::Bytes(b" x;".to_vec()));
}

#[test]
fn control_bytes_render_inverted() {
    let m = model(&[b"a\x01b"], 30, 4);
    let w = render_frame(&m, Instant::now());
    let cmds = w.commands();
    let at = cmds
        .iter()
        .position(|c| *c == Command::Print("A".into()))
        .expect("ctrl-a shown as A");
    assert_eq!(cmds[at - 1], Command::Reverse(true));
    assert_eq!(cmds[at + 1], Command::Reverse(false));
}

#[test]
fn empty_document_shows_welcome_banner() {
    let m = model(&[], 80, 11);
    let w = render_frame(&m, Instant::now());
    let text = printed(w.commands());
    let banner = text
        .iter()
        .find(|s| s.contains(&welcome_message()))
        .expect("welcome banner");
    assert!(banner.starts_with('~'));
    let pad = (80 - welcome_message().len()) / 2;
    assert_eq!(banner.len(), pad + welcome_message().len());
}

#[test]
fn prompt_replaces_status_message() {
    let mut m = model(&[b"x"], 60, 4);
    m.set_status("saved");
    let now = Instant::now();
    assert!(printed(render_frame(&m, now).commands()).contains(&"saved".to_string()));
    m.open_prompt(Prompt::SaveAs("out".into()));
    let text = printed(render_frame(&m, now).commands());
    assert!(text.contains(&"Save as: out (ESC to cancel)".to_string()));
    assert!(!text.contains(&"saved".to_string()));
}

#[test]
fn cursor_is_placed_last() {
    let mut m = model(&[b"\tab"], 30, 4);
    m.set_cursor(Position::new(0, 2));
    m.scroll();
    let w = render_frame(&m, Instant::now());
    let cmds = w.commands();
    assert_eq!(cmds[cmds.len() - 2], Command::MoveTo(9, 0));
    assert_eq!(cmds[cmds.len() - 1], Command::ShowCursor);
}

#[test]
fn frame_flushes_to_any_writer() {
    let m = model(&[b"hello"], 20, 3);
    let mut out = Vec::new();
    render_frame(&m, Instant::now()).flush_to(&mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("hello"));
    assert!(s.contains("\x1b[K"));
}
