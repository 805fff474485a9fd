//! Page pacing for multi-page charts.
//!
//! Rendering never blocks; this module is the only place that waits for the
//! user, and only when both stdin and stdout are terminals.

use std::io::{self, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::error::AppError;

/// What the user asked for after a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Next,
    Quit,
}

/// True when we can sensibly wait for a key press.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Block until Enter/space (next page) or q/Esc/Ctrl-C (stop paging).
pub fn wait_for_next_page() -> Result<PageAction, AppError> {
    let mut stdout = io::stdout();
    write!(stdout, "\nPress Enter to view the next page (q to stop)...")
        .and_then(|_| stdout.flush())
        .map_err(|e| AppError::new(4, format!("Failed to write prompt: {e}")))?;

    let action = {
        let _guard = RawModeGuard::new()?;
        read_action()?
    };

    writeln!(stdout).map_err(|e| AppError::new(4, format!("Failed to write prompt: {e}")))?;
    Ok(action)
}

fn read_action() -> Result<PageAction, AppError> {
    loop {
        let Event::Key(key) = event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => return Ok(PageAction::Next),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(PageAction::Quit),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(PageAction::Quit),
            _ => {}
        }
    }
}

/// Ensures raw mode is disabled again, even on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
