#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII ownership of raw mode and the input modes the driver needs. All
//! state changes are tracked and undone in reverse order on [`Drop`], so
//! the terminal is restored on normal return, `?`, and panic unwinding
//! alike.
//!
//! # Cleanup Order
//!
//! 1. Disable focus-change events (if enabled)
//! 2. Disable mouse capture (if enabled)
//! 3. Show the hardware cursor (always; a surface may have hidden it)
//! 4. Exit raw mode (always)

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::Event;

/// Which input modes a session enables.
///
/// Defaults are conservative; the driver enables what the engines it
/// carries actually need (mouse capture only for hover-pausing engines).
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Capture mouse events (`CSI ? 1000;1002;1006 h`).
    pub mouse_capture: bool,
    /// Report focus gained/lost (`CSI ? 1004 h`).
    pub focus_events: bool,
}

/// An active raw-mode terminal session.
#[derive(Debug)]
pub struct TtySession {
    mouse_capture: bool,
    focus_events: bool,
}

impl TtySession {
    /// Enter raw mode and enable the requested input modes.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if options.mouse_capture {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
        }
        if options.focus_events {
            crossterm::execute!(stdout, crossterm::event::EnableFocusChange)?;
        }
        stdout.flush()?;
        Ok(Self {
            mouse_capture: options.mouse_capture,
            focus_events: options.focus_events,
        })
    }

    /// Terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for an input event.
    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read one input event. Only call after `poll` returned true.
    pub fn read(&self) -> io::Result<Event> {
        crossterm::event::read()
    }
}

impl Drop for TtySession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.focus_events {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableFocusChange);
        }
        if self.mouse_capture {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
        }
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}
