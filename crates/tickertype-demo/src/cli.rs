#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary
//! lean. Supports environment variable overrides via the `TICKERTYPE_*`
//! prefix.

use std::env;
use std::process;
use std::time::Duration;

use tickertype::Options;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
tickertype demo — typewriter text animation in your terminal

USAGE:
    tickertype-demo [OPTIONS]

OPTIONS:
    --words=A,B,C        Comma-separated word list to cycle
    --type-speed=MS      Delay between typed characters (default: 100)
    --delete-speed=MS    Delay between deleted characters (default: 60)
    --delay=MS           Hold after a completed word (default: 1500)
    --cursor-glyph=S     Cursor indicator glyph (default: |)
    --seed=N             Fix the PRNG seed (jitter, shuffle, scramble)
    --no-loop            Stop after the last word
    --no-cursor          Hide the blinking cursor
    --no-jitter          Use exact per-character delays
    --scramble           Scramble-reveal each character
    --fade-in            Fade revealed characters in
    --shuffle            Shuffle the word order once at startup
    --sound              Ring the terminal bell per character
    --hover-pause        Pause while the mouse hovers the text
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    TICKERTYPE_WORDS         Override --words
    TICKERTYPE_TYPE_SPEED    Override --type-speed
    TICKERTYPE_SEED          Override --seed";

/// Parsed command-line options.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Words to cycle; empty means the built-in default list.
    pub words: Vec<String>,
    /// Delay between typed characters.
    pub type_speed: Option<Duration>,
    /// Delay between deleted characters.
    pub delete_speed: Option<Duration>,
    /// Hold after a completed word.
    pub delay: Option<Duration>,
    /// Cursor indicator glyph.
    pub cursor_glyph: Option<String>,
    /// Fixed PRNG seed.
    pub seed: Option<u64>,
    /// Stop after the last word.
    pub no_loop: bool,
    /// Hide the blinking cursor.
    pub no_cursor: bool,
    /// Use exact per-character delays.
    pub no_jitter: bool,
    /// Scramble-reveal each character.
    pub scramble: bool,
    /// Fade revealed characters in.
    pub fade_in: bool,
    /// Shuffle the word order once at startup.
    pub shuffle: bool,
    /// Ring the terminal bell per character.
    pub sound: bool,
    /// Pause while the mouse hovers the text.
    pub hover_pause: bool,
}

impl Opts {
    /// Parse from process args and environment, exiting on `--help`,
    /// `--version`, or a malformed argument.
    pub fn parse() -> Self {
        match Self::parse_args(env::args().skip(1)) {
            Ok(ParseOutcome::Opts(mut opts)) => {
                opts.apply_env();
                opts
            }
            Ok(ParseOutcome::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(ParseOutcome::Version) => {
                println!("tickertype-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("run with --help for usage");
                process::exit(2);
            }
        }
    }

    /// Parse an argument list. Split out for tests.
    fn parse_args(args: impl Iterator<Item = String>) -> Result<ParseOutcome, String> {
        let mut opts = Opts::default();
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(ParseOutcome::Help),
                "--version" | "-V" => return Ok(ParseOutcome::Version),
                "--no-loop" => opts.no_loop = true,
                "--no-cursor" => opts.no_cursor = true,
                "--no-jitter" => opts.no_jitter = true,
                "--scramble" => opts.scramble = true,
                "--fade-in" => opts.fade_in = true,
                "--shuffle" => opts.shuffle = true,
                "--sound" => opts.sound = true,
                "--hover-pause" => opts.hover_pause = true,
                _ => {
                    if let Some(value) = arg.strip_prefix("--words=") {
                        opts.words = split_words(value);
                    } else if let Some(value) = arg.strip_prefix("--type-speed=") {
                        opts.type_speed = Some(parse_ms("--type-speed", value)?);
                    } else if let Some(value) = arg.strip_prefix("--delete-speed=") {
                        opts.delete_speed = Some(parse_ms("--delete-speed", value)?);
                    } else if let Some(value) = arg.strip_prefix("--delay=") {
                        opts.delay = Some(parse_ms("--delay", value)?);
                    } else if let Some(value) = arg.strip_prefix("--cursor-glyph=") {
                        opts.cursor_glyph = Some(value.to_string());
                    } else if let Some(value) = arg.strip_prefix("--seed=") {
                        opts.seed = Some(
                            value
                                .parse()
                                .map_err(|_| format!("--seed expects a number, got `{value}`"))?,
                        );
                    } else {
                        return Err(format!("unknown argument `{arg}`"));
                    }
                }
            }
        }
        Ok(ParseOutcome::Opts(opts))
    }

    fn apply_env(&mut self) {
        if let Ok(value) = env::var("TICKERTYPE_WORDS") {
            self.words = split_words(&value);
        }
        if let Ok(value) = env::var("TICKERTYPE_TYPE_SPEED") {
            if let Ok(ms) = value.parse::<u64>() {
                self.type_speed = Some(Duration::from_millis(ms));
            }
        }
        if let Ok(value) = env::var("TICKERTYPE_SEED") {
            if let Ok(seed) = value.parse() {
                self.seed = Some(seed);
            }
        }
    }

    /// Lower into engine [`Options`].
    pub fn to_options(&self) -> Options {
        let mut options = Options::new()
            .loop_words(!self.no_loop)
            .cursor(!self.no_cursor)
            .jitter(!self.no_jitter)
            .scramble(self.scramble)
            .fade_in(self.fade_in)
            .shuffle(self.shuffle)
            .sound(self.sound)
            .pause_on_hover(self.hover_pause);
        if !self.words.is_empty() {
            options = options.words(self.words.clone());
        }
        if let Some(speed) = self.type_speed {
            options = options.type_speed(speed);
        }
        if let Some(speed) = self.delete_speed {
            options = options.delete_speed(speed);
        }
        if let Some(delay) = self.delay {
            options = options.delay_between_words(delay);
        }
        if let Some(glyph) = &self.cursor_glyph {
            options = options.cursor_glyph(glyph.clone());
        }
        if let Some(seed) = self.seed {
            options = options.seed(seed);
        }
        options
    }
}

enum ParseOutcome {
    Opts(Opts),
    Help,
    Version,
}

fn split_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_ms(flag: &str, value: &str) -> Result<Duration, String> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| format!("{flag} expects milliseconds, got `{value}`"))
}
