#![forbid(unsafe_code)]

//! Core: typewriter engine, word sources, timing, and render strategies.

pub mod attrs;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod rng;
pub mod sound;
pub mod style;
pub mod surface;
pub mod testkit;
pub mod words;

pub use config::{Config, Options};
pub use engine::{Phase, Typewriter};
pub use error::{Error, Result};
pub use surface::{Glyph, Surface};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
