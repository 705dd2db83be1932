#![forbid(unsafe_code)]

//! Native terminal backend for tickertype.
//!
//! Provides the crossterm-backed pieces an engine needs to animate inside
//! a real terminal: an inline one-row [`surface::TtySurface`], an RAII
//! [`session::TtySession`] that owns raw mode and restores the terminal on
//! drop, a best-effort [`bell::TerminalBell`] key click, and a
//! [`driver::Driver`] loop that multiplexes engine deadlines with input
//! events.

pub mod bell;
pub mod driver;
pub mod session;
pub mod surface;

pub use bell::TerminalBell;
pub use driver::Driver;
pub use session::{SessionOptions, TtySession};
pub use surface::{Region, TtySurface};
