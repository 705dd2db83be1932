#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! [`Options`] is the caller-facing builder. It resolves against a target's
//! declarative [`Attrs`] into an immutable [`Config`], per field:
//! explicit option > attribute > default. Malformed or non-positive inputs
//! fall back to the default for that field with a warning — resolution
//! never fails.

use std::time::Duration;

use crate::attrs::{self, Attrs};
use crate::hooks::{Hooks, UnitHook, WordHook};
use crate::words;

/// Default typing speed.
pub const DEFAULT_TYPE_SPEED: Duration = Duration::from_millis(100);
/// Default deleting speed.
pub const DEFAULT_DELETE_SPEED: Duration = Duration::from_millis(60);
/// Default hold between a completed word and its deletion.
pub const DEFAULT_DELAY_BETWEEN_WORDS: Duration = Duration::from_millis(1500);
/// Default cursor blink interval.
pub const DEFAULT_CURSOR_BLINK: Duration = Duration::from_millis(530);
/// Default cursor glyph.
pub const DEFAULT_CURSOR_GLYPH: &str = "|";

/// Immutable, resolved engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Delay between revealed characters.
    pub type_speed: Duration,
    /// Delay between deleted characters.
    pub delete_speed: Duration,
    /// Hold after a word completes, before deleting. May be zero. Never
    /// jittered.
    pub delay_between_words: Duration,
    /// Wrap back to the first word after the last.
    pub loop_words: bool,
    /// Show the blinking cursor indicator.
    pub cursor: bool,
    /// Cursor indicator glyph.
    pub cursor_glyph: String,
    /// Cursor blink interval.
    pub cursor_blink: Duration,
    /// Start typing at construction.
    pub autostart: bool,
    /// Shuffle the word list once at startup.
    pub shuffle: bool,
    /// Scramble-reveal strategy. Takes precedence over `fade_in`.
    pub scramble: bool,
    /// Fade-in reveal strategy.
    pub fade_in: bool,
    /// Apply ±30% jitter to per-character delays.
    pub jitter: bool,
    /// Key click per revealed character.
    pub sound: bool,
    /// Pause while the pointer hovers the target region.
    pub pause_on_hover: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            type_speed: DEFAULT_TYPE_SPEED,
            delete_speed: DEFAULT_DELETE_SPEED,
            delay_between_words: DEFAULT_DELAY_BETWEEN_WORDS,
            loop_words: true,
            cursor: true,
            cursor_glyph: DEFAULT_CURSOR_GLYPH.to_string(),
            cursor_blink: DEFAULT_CURSOR_BLINK,
            autostart: true,
            shuffle: false,
            scramble: false,
            fade_in: false,
            jitter: true,
            sound: false,
            pause_on_hover: false,
        }
    }
}

/// Builder for engine construction.
#[derive(Debug, Default)]
pub struct Options {
    words: Vec<String>,
    type_speed: Option<Duration>,
    delete_speed: Option<Duration>,
    delay_between_words: Option<Duration>,
    loop_words: Option<bool>,
    cursor: Option<bool>,
    cursor_glyph: Option<String>,
    cursor_blink: Option<Duration>,
    autostart: Option<bool>,
    shuffle: Option<bool>,
    scramble: Option<bool>,
    fade_in: Option<bool>,
    jitter: Option<bool>,
    sound: Option<bool>,
    pause_on_hover: Option<bool>,
    seed: Option<u64>,
    hooks: Hooks,
}

impl Options {
    /// Start from all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit word list (highest-priority word source).
    #[must_use]
    pub fn words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Delay between revealed characters.
    #[must_use]
    pub fn type_speed(mut self, speed: Duration) -> Self {
        self.type_speed = Some(speed);
        self
    }

    /// Delay between deleted characters.
    #[must_use]
    pub fn delete_speed(mut self, speed: Duration) -> Self {
        self.delete_speed = Some(speed);
        self
    }

    /// Hold after a completed word, before deletion begins.
    #[must_use]
    pub fn delay_between_words(mut self, delay: Duration) -> Self {
        self.delay_between_words = Some(delay);
        self
    }

    /// Wrap back to the first word after the last.
    #[must_use]
    pub fn loop_words(mut self, yes: bool) -> Self {
        self.loop_words = Some(yes);
        self
    }

    /// Show the blinking cursor indicator.
    #[must_use]
    pub fn cursor(mut self, yes: bool) -> Self {
        self.cursor = Some(yes);
        self
    }

    /// Cursor indicator glyph.
    #[must_use]
    pub fn cursor_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.cursor_glyph = Some(glyph.into());
        self
    }

    /// Cursor blink interval.
    #[must_use]
    pub fn cursor_blink(mut self, interval: Duration) -> Self {
        self.cursor_blink = Some(interval);
        self
    }

    /// Start typing at construction.
    #[must_use]
    pub fn autostart(mut self, yes: bool) -> Self {
        self.autostart = Some(yes);
        self
    }

    /// Shuffle the word list once at startup.
    #[must_use]
    pub fn shuffle(mut self, yes: bool) -> Self {
        self.shuffle = Some(yes);
        self
    }

    /// Scramble-reveal strategy.
    #[must_use]
    pub fn scramble(mut self, yes: bool) -> Self {
        self.scramble = Some(yes);
        self
    }

    /// Fade-in reveal strategy.
    #[must_use]
    pub fn fade_in(mut self, yes: bool) -> Self {
        self.fade_in = Some(yes);
        self
    }

    /// Apply ±30% jitter to per-character delays.
    #[must_use]
    pub fn jitter(mut self, yes: bool) -> Self {
        self.jitter = Some(yes);
        self
    }

    /// Key click per revealed character.
    #[must_use]
    pub fn sound(mut self, yes: bool) -> Self {
        self.sound = Some(yes);
        self
    }

    /// Pause while the pointer hovers the target region.
    #[must_use]
    pub fn pause_on_hover(mut self, yes: bool) -> Self {
        self.pause_on_hover = Some(yes);
        self
    }

    /// Fix the PRNG seed (shuffle, jitter, scramble) for reproducibility.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Hook fired by `start()` with the word about to be typed.
    #[must_use]
    pub fn on_start(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.hooks.on_start = Some(Box::new(hook) as WordHook);
        self
    }

    /// Hook fired when a word is fully revealed.
    #[must_use]
    pub fn on_word_complete(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.hooks.on_word_complete = Some(Box::new(hook) as WordHook);
        self
    }

    /// Hook fired when a word finishes deleting.
    #[must_use]
    pub fn on_delete_start(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.hooks.on_delete_start = Some(Box::new(hook) as UnitHook);
        self
    }

    /// Hook fired on each wrap back to the first word.
    #[must_use]
    pub fn on_loop_restart(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.hooks.on_loop_restart = Some(Box::new(hook) as UnitHook);
        self
    }

    /// Hook fired by `stop()`.
    #[must_use]
    pub fn on_stop(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.hooks.on_stop = Some(Box::new(hook) as UnitHook);
        self
    }

    /// Resolve against a target's attributes into engine inputs.
    pub(crate) fn resolve(self, attrs: &Attrs) -> Resolved {
        let defaults = Config::default();

        let type_speed = positive_duration(
            attrs::TYPE_SPEED,
            self.type_speed.or(attr_duration(attrs, attrs::TYPE_SPEED)),
            defaults.type_speed,
        );
        let delete_speed = positive_duration(
            attrs::DELETE_SPEED,
            self.delete_speed
                .or(attr_duration(attrs, attrs::DELETE_SPEED)),
            defaults.delete_speed,
        );
        // The inter-word hold may legitimately be zero.
        let delay_between_words = self
            .delay_between_words
            .or(attr_duration(attrs, attrs::DELAY))
            .unwrap_or(defaults.delay_between_words);
        let cursor_blink = positive_duration(
            "cursor-blink",
            self.cursor_blink,
            defaults.cursor_blink,
        );

        let config = Config {
            type_speed,
            delete_speed,
            delay_between_words,
            loop_words: self
                .loop_words
                .or(attrs.flag(attrs::LOOP))
                .unwrap_or(defaults.loop_words),
            cursor: self
                .cursor
                .or(attrs.flag(attrs::CURSOR))
                .unwrap_or(defaults.cursor),
            cursor_glyph: self
                .cursor_glyph
                .or_else(|| attrs.get(attrs::CURSOR_GLYPH).map(str::to_string))
                .unwrap_or(defaults.cursor_glyph),
            cursor_blink,
            autostart: self.autostart.unwrap_or(defaults.autostart),
            shuffle: self.shuffle.unwrap_or(defaults.shuffle),
            scramble: self.scramble.unwrap_or(defaults.scramble),
            fade_in: self.fade_in.unwrap_or(defaults.fade_in),
            jitter: self.jitter.unwrap_or(defaults.jitter),
            sound: self.sound.unwrap_or(defaults.sound),
            pause_on_hover: self.pause_on_hover.unwrap_or(defaults.pause_on_hover),
        };

        let word_list = words::resolve(&self.words, attrs);

        Resolved {
            config,
            words: word_list,
            hooks: self.hooks,
            seed: self.seed,
        }
    }
}

/// Engine inputs after per-field resolution.
#[derive(Debug)]
pub(crate) struct Resolved {
    pub config: Config,
    pub words: Vec<String>,
    pub hooks: Hooks,
    pub seed: Option<u64>,
}

/// Read a duration attribute, warning (and yielding `None`) on parse failure.
fn attr_duration(attrs: &Attrs, key: &str) -> Option<Duration> {
    match attrs.duration_ms(key) {
        Ok(value) => value,
        Err(_err) => {
            crate::warn!("ignoring malformed attribute: {_err}");
            None
        }
    }
}

/// Enforce a strictly positive duration, warning and substituting the
/// default otherwise.
fn positive_duration(_field: &str, value: Option<Duration>, default: Duration) -> Duration {
    match value {
        Some(d) if !d.is_zero() => d,
        Some(_) => {
            crate::warn!("non-positive duration for `{_field}`, using default");
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(options: Options, attrs: &Attrs) -> Resolved {
        options.resolve(attrs)
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.type_speed, Duration::from_millis(100));
        assert_eq!(config.delete_speed, Duration::from_millis(60));
        assert_eq!(config.delay_between_words, Duration::from_millis(1500));
        assert_eq!(config.cursor_blink, Duration::from_millis(530));
        assert_eq!(config.cursor_glyph, "|");
        assert!(config.loop_words);
        assert!(config.cursor);
        assert!(config.autostart);
        assert!(config.jitter);
        assert!(!config.shuffle);
        assert!(!config.scramble);
        assert!(!config.fade_in);
        assert!(!config.sound);
        assert!(!config.pause_on_hover);
    }

    #[test]
    fn explicit_option_beats_attribute() {
        let attrs = Attrs::new().with(attrs::TYPE_SPEED, "250");
        let r = resolved(
            Options::new().type_speed(Duration::from_millis(40)),
            &attrs,
        );
        assert_eq!(r.config.type_speed, Duration::from_millis(40));
    }

    #[test]
    fn attribute_beats_default() {
        let attrs = Attrs::new()
            .with(attrs::TYPE_SPEED, "250")
            .with(attrs::LOOP, "false")
            .with(attrs::CURSOR_GLYPH, "_");
        let r = resolved(Options::new(), &attrs);
        assert_eq!(r.config.type_speed, Duration::from_millis(250));
        assert!(!r.config.loop_words);
        assert_eq!(r.config.cursor_glyph, "_");
    }

    #[test]
    fn priority_is_per_field() {
        // Explicit delete speed, attribute type speed: both should land.
        let attrs = Attrs::new().with(attrs::TYPE_SPEED, "300");
        let r = resolved(
            Options::new().delete_speed(Duration::from_millis(10)),
            &attrs,
        );
        assert_eq!(r.config.type_speed, Duration::from_millis(300));
        assert_eq!(r.config.delete_speed, Duration::from_millis(10));
    }

    #[test]
    fn zero_speed_falls_back_to_default() {
        let r = resolved(Options::new().type_speed(Duration::ZERO), &Attrs::new());
        assert_eq!(r.config.type_speed, DEFAULT_TYPE_SPEED);
    }

    #[test]
    fn zero_delay_is_allowed() {
        let r = resolved(
            Options::new().delay_between_words(Duration::ZERO),
            &Attrs::new(),
        );
        assert_eq!(r.config.delay_between_words, Duration::ZERO);
    }

    #[test]
    fn zero_blink_falls_back_to_default() {
        let r = resolved(Options::new().cursor_blink(Duration::ZERO), &Attrs::new());
        assert_eq!(r.config.cursor_blink, DEFAULT_CURSOR_BLINK);
    }

    #[test]
    fn malformed_attr_duration_is_ignored() {
        let attrs = Attrs::new().with(attrs::DELAY, "later");
        let r = resolved(Options::new(), &attrs);
        assert_eq!(r.config.delay_between_words, DEFAULT_DELAY_BETWEEN_WORDS);
    }

    #[test]
    fn words_resolution_prefers_explicit() {
        let attrs = Attrs::new().with(attrs::WORDS, r#"["attr"]"#);
        let r = resolved(Options::new().words(["explicit"]), &attrs);
        assert_eq!(r.words, vec!["explicit".to_string()]);
    }

    #[test]
    fn seed_passes_through() {
        let r = resolved(Options::new().seed(7), &Attrs::new());
        assert_eq!(r.seed, Some(7));
    }

    #[test]
    fn hooks_pass_through() {
        let r = resolved(Options::new().on_stop(|| {}), &Attrs::new());
        assert!(r.hooks.on_stop.is_some());
        assert!(r.hooks.on_start.is_none());
    }
}
