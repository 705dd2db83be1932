#![forbid(unsafe_code)]

//! Tickertype public facade.
//!
//! Re-exports the stable surface area from the internal crates, offers a
//! lightweight prelude, and hosts the auto-discovery bootstrap that turns
//! a batch of flagged target specs into running engines.

use std::fmt;
use std::io;

// --- Core re-exports -------------------------------------------------------

pub use tickertype_core::attrs::Attrs;
pub use tickertype_core::config::{Config, Options};
pub use tickertype_core::engine::{Phase, Typewriter};
pub use tickertype_core::hooks::Hooks;
pub use tickertype_core::sound::KeyClick;
pub use tickertype_core::surface::{Glyph, Surface};

// --- Terminal backend re-exports -------------------------------------------

#[cfg(feature = "tty")]
pub use tickertype_tty::{Driver, Region, SessionOptions, TerminalBell, TtySession, TtySurface};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tickertype applications.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(io::Error),
    /// Engine configuration failure.
    Engine(tickertype_core::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<tickertype_core::Error> for Error {
    fn from(err: tickertype_core::Error) -> Self {
        Self::Engine(err)
    }
}

/// Standard result type for tickertype APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Auto-discovery --------------------------------------------------------

/// A candidate render target plus its declarative attributes.
#[derive(Debug)]
pub struct TargetSpec<S: Surface> {
    /// The surface an engine would render into.
    pub surface: S,
    /// Declarative configuration attached to the target.
    pub attrs: Attrs,
}

impl<S: Surface> TargetSpec<S> {
    /// Bundle a surface with its attributes.
    pub fn new(surface: S, attrs: Attrs) -> Self {
        Self { surface, attrs }
    }
}

/// Construct one engine per spec flagged for auto-instantiation.
///
/// Targets without the `auto` attribute are skipped (their surfaces are
/// dropped). Construction failures degrade to inert engines, which are
/// still collected, so one bad target never aborts the scan.
pub fn scan<S: Surface>(specs: Vec<TargetSpec<S>>) -> Vec<Typewriter<S>> {
    specs
        .into_iter()
        .filter(|spec| spec.attrs.auto())
        .map(|spec| Typewriter::with_attrs(spec.surface, &spec.attrs, Options::new()))
        .collect()
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{scan, Attrs, Error, Glyph, Options, Phase, Result, Surface, TargetSpec, Typewriter};

    #[cfg(feature = "tty")]
    pub use crate::{Driver, Region, SessionOptions, TerminalBell, TtySession, TtySurface};
}

pub use tickertype_core as core;
#[cfg(feature = "tty")]
pub use tickertype_tty as tty;
