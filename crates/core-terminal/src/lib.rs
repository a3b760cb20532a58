//! Owns the terminal while the editor runs.
//!
//! Entering switches to raw mode and the alternate screen with the hardware
//! cursor hidden; leaving undoes both. `TerminalGuard` leaves when it goes
//! out of scope, which covers `?` exits and unwinding panics in the event
//! loop. Leaving twice, or without entering, does nothing.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;

/// Size assumed when the terminal cannot report one (columns, rows).
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

/// Geometry to lay out against: the reported size, or `FALLBACK_SIZE` when
/// either dimension is zero (some ptys report 0x0 before the first resize).
pub fn usable_size(reported: (u16, u16)) -> (u16, u16) {
    match reported {
        (0, _) | (_, 0) => FALLBACK_SIZE,
        size => size,
    }
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Enter the editor screen; the returned guard leaves it on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Ok(());
        }
        enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, Hide) {
            // Half-entered: at least give the shell its line discipline back.
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        self.entered = true;
        tracing::debug!(target: "terminal", "raw_mode_entered");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        let screen = execute!(stdout(), LeaveAlternateScreen, Show);
        let raw = disable_raw_mode();
        tracing::debug!(target: "terminal", "raw_mode_left");
        screen?;
        raw?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        let reported = terminal::size()?;
        let size = usable_size(reported);
        if size != reported {
            tracing::warn!(
                target: "terminal",
                cols = reported.0,
                rows = reported.1,
                "degenerate_size_fallback"
            );
        }
        Ok(size)
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Scoped ownership of the editor screen.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl TerminalGuard<'_> {
    pub fn backend(&self) -> &CrosstermBackend {
        &*self.backend
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            tracing::warn!(target: "terminal", error = %e, "terminal_restore_failed");
        }
    }
}
