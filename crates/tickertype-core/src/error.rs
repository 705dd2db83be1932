#![forbid(unsafe_code)]

//! Error taxonomy for engine construction and configuration.
//!
//! None of these conditions are fatal to a hosting application: the engine
//! logs a warning and degrades to an inert instance instead of propagating.
//! The variants exist for the fallible internals (attribute parsing, word
//! resolution) and for callers that use those APIs directly.

use std::fmt;

/// Errors surfaced by the lower-level configuration APIs.
#[derive(Debug)]
pub enum Error {
    /// The resolved word list was empty after every fallback.
    NoWords,
    /// The render target was absent or detached at construction.
    DetachedTarget,
    /// A declarative attribute could not be parsed.
    BadAttr {
        /// Attribute key that failed to parse.
        key: String,
        /// Human-readable parse failure.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWords => write!(f, "no words available after all fallbacks"),
            Self::DetachedTarget => write!(f, "render target is absent or detached"),
            Self::BadAttr { key, reason } => write!(f, "bad attribute `{key}`: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

/// Standard result type for tickertype APIs.
pub type Result<T> = std::result::Result<T, Error>;
