#![forbid(unsafe_code)]

//! Demo binary: two animated lines in a raw-mode terminal.
//!
//! The first engine is configured from the command line; the second is
//! built declaratively through attribute auto-discovery, showing the
//! data-driven path.

mod cli;

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tickertype::core::attrs;
use tickertype::prelude::*;

const TITLE: &str = "tickertype demo — press q to quit";
const PROMPT: &str = "I am a ";
const ATTR_PROMPT: &str = "Also on the wire: ";
const LINE_WIDTH: u16 = 48;

fn main() {
    let opts = cli::Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&opts) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(opts: &cli::Opts) -> tickertype::Result<()> {
    let mut driver = Driver::new();

    // Line one: CLI-configured engine.
    let surface = TtySurface::stdout(Region::new(PROMPT.len() as u16, 2, LINE_WIDTH));
    let mut engine = Typewriter::new(surface, opts.to_options());
    if opts.sound {
        engine.set_key_click(TerminalBell::stdout());
    }
    driver.add(engine);

    // Line two: declarative attributes through auto-discovery.
    let declarative = Attrs::new()
        .with(attrs::AUTO, "true")
        .with(attrs::WORDS, r#"["ticker tape", "telegrams", "stock quotes"]"#)
        .with(attrs::TYPE_SPEED, "70")
        .with(attrs::CURSOR_GLYPH, "_");
    let specs = vec![TargetSpec::new(
        TtySurface::stdout(Region::new(ATTR_PROMPT.len() as u16, 4, LINE_WIDTH)),
        declarative,
    )];
    for engine in scan(specs) {
        driver.add(engine);
    }

    let session = TtySession::new(SessionOptions {
        mouse_capture: driver.wants_mouse(),
        focus_events: true,
    })?;

    paint_chrome()?;
    driver.run(&session)?;
    drop(session);

    // Leave the shell prompt below the animation rows.
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, MoveTo(0, 6), Print("\n"))?;
    Ok(())
}

fn paint_chrome() -> io::Result<()> {
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print(TITLE),
        MoveTo(0, 2),
        Print(PROMPT),
        MoveTo(0, 4),
        Print(ATTR_PROMPT),
    )?;
    stdout.flush()
}
