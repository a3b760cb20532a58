//! Terminal input decoding.
//!
//! crossterm owns escape-sequence parsing; this crate narrows its events to
//! the closed `core_events` key set. Reads block until an event arrives, so
//! the editor loop stays single-threaded.

mod key_token;

use anyhow::Result;
use core_events::InputEvent;
use crossterm::event::{self, Event as CEvent};

/// Translate one crossterm event. Mouse, focus and paste events, key
/// releases and unbound keys yield `None`.
pub fn translate(event: CEvent) -> Option<InputEvent> {
    let out = match event {
        CEvent::Key(key) => key_token::map_key_event(&key).map(InputEvent::Key),
        CEvent::Resize(cols, rows) => Some(InputEvent::Resize(cols, rows)),
        CEvent::Mouse(_) | CEvent::FocusGained | CEvent::FocusLost | CEvent::Paste(_) => None,
    };
    if let Some(ev) = &out {
        tracing::trace!(target: "input", event = ?ev, "input_event");
    }
    out
}

/// Block until the next event the editor understands.
pub fn read_event() -> Result<InputEvent> {
    loop {
        if let Some(ev) = translate(event::read()?) {
            return Ok(ev);
        }
    }
}
