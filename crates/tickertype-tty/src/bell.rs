#![forbid(unsafe_code)]

//! Terminal-bell key click.

use std::io::{self, Write};

use tickertype_core::sound::KeyClick;

/// BEL, the audible (or visual) terminal bell.
const BEL: &[u8] = b"\x07";

/// A [`KeyClick`] that rings the terminal bell. Strictly best-effort:
/// write failures and muted terminals are silently ignored.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    /// A bell ringing through stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    /// A bell ringing through an arbitrary sink.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> KeyClick for TerminalBell<W> {
    fn click(&mut self) {
        let _ = self.out.write_all(BEL);
        let _ = self.out.flush();
    }
}
