#![forbid(unsafe_code)]

//! The typewriter engine: a type/delete state machine driven by deadlines.
//!
//! An engine owns its typing state and every deadline it arms; it borrows
//! the render target. A driver advances it with [`Typewriter::tick`] and
//! may sleep until [`Typewriter::time_to_next`]. All mutation happens on
//! the calling thread — there is no interior concurrency.
//!
//! # Scheduling discipline
//!
//! At most one main-step deadline is armed at any time. A fired step checks
//! the running/paused flags first and either performs one transition and
//! re-arms exactly one successor, or does nothing. `stop()` and `pause()`
//! therefore never race a queued step: the step observes the flags and
//! dies. Revocation is reserved for the cursor-blink and effect
//! sub-deadlines, which `destroy()` cancels outright.
//!
//! # Invariants
//!
//! 1. `word_index` is always in `[0, words.len())`; `char_index` is in
//!    `[0, grapheme count of the current word]`.
//! 2. Hooks fire synchronously inside the step that performs their
//!    transition, at most once per transition.
//! 3. After `destroy()` no surface call and no hook invocation occurs,
//!    regardless of further ticks.
//! 4. An inert engine (detached target or empty word list) performs no
//!    surface mutation and arms no deadline, ever.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::attrs::Attrs;
use crate::config::{Config, Options};
use crate::effects::{self, FadeRun, ScrambleRun, Strategy, FADE_TICK, SCRAMBLE_TICK};
use crate::hooks::Hooks;
use crate::rng::{jittered, XorShift64};
use crate::sound::KeyClick;
use crate::surface::Surface;
use crate::words;

/// Which half of the cycle the engine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Revealing characters left to right.
    Typing,
    /// Removing characters right to left.
    Deleting,
}

/// Armed deadlines, as absolute engine times.
#[derive(Debug, Clone, Copy, Default)]
struct Deadlines {
    /// The single main-step deadline.
    step: Option<Duration>,
    /// Cursor blink interval.
    blink: Option<Duration>,
    /// Scramble/fade sub-cadence.
    effect: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeadlineKind {
    Effect,
    Blink,
    Step,
}

#[derive(Debug, Clone)]
enum EffectRun {
    Scramble(ScrambleRun),
    Fade(FadeRun),
}

/// A typewriter animation engine bound to one render target.
pub struct Typewriter<S: Surface> {
    surface: S,
    config: Config,
    words: Vec<String>,
    hooks: Hooks,
    click: Option<Box<dyn KeyClick + Send>>,
    rng: XorShift64,

    word_index: usize,
    char_index: usize,
    phase: Phase,
    running: bool,
    paused: bool,
    cursor_visible: bool,

    elapsed: Duration,
    deadlines: Deadlines,
    effect: Option<EffectRun>,

    inert: bool,
    destroyed: bool,
}

impl<S: Surface> std::fmt::Debug for Typewriter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typewriter")
            .field("word_index", &self.word_index)
            .field("char_index", &self.char_index)
            .field("phase", &self.phase)
            .field("running", &self.running)
            .field("paused", &self.paused)
            .field("inert", &self.inert)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<S: Surface> Typewriter<S> {
    /// Construct an engine with no declarative attributes.
    pub fn new(surface: S, options: Options) -> Self {
        Self::with_attrs(surface, &Attrs::default(), options)
    }

    /// Construct an engine with all defaults.
    pub fn with_defaults(surface: S) -> Self {
        Self::new(surface, Options::new())
    }

    /// Construct an engine, resolving `options` against the target's
    /// declarative `attrs` (explicit option > attribute > default, per
    /// field).
    ///
    /// Construction never fails: a detached target or an empty resolved
    /// word list logs a warning and yields an inert engine whose lifecycle
    /// calls are all no-ops.
    pub fn with_attrs(surface: S, attrs: &Attrs, options: Options) -> Self {
        let resolved = options.resolve(attrs);
        let mut rng = resolved
            .seed
            .map(XorShift64::new)
            .unwrap_or_else(XorShift64::from_entropy);

        let mut inert = false;
        if !surface.is_attached() {
            crate::warn!("typewriter: render target absent, engine is inert");
            inert = true;
        }

        let mut word_list = resolved.words;
        // `words::resolve` falls back to the built-in list, so this only
        // trips if that invariant is ever broken upstream.
        if word_list.is_empty() {
            crate::warn!("typewriter: no words after all fallbacks, engine is inert");
            inert = true;
        }
        if resolved.config.shuffle {
            words::shuffle(&mut word_list, &mut rng);
        }

        let mut engine = Self {
            surface,
            config: resolved.config,
            words: word_list,
            hooks: resolved.hooks,
            click: None,
            rng,
            word_index: 0,
            char_index: 0,
            phase: Phase::Typing,
            running: false,
            paused: false,
            cursor_visible: true,
            elapsed: Duration::ZERO,
            deadlines: Deadlines::default(),
            effect: None,
            inert,
            destroyed: false,
        };

        if !engine.inert {
            engine.init();
        }
        engine
    }

    fn init(&mut self) {
        if self.config.cursor {
            self.surface.set_cursor_glyph(Some(&self.config.cursor_glyph));
            self.surface.set_cursor_visible(true);
            self.deadlines.blink = Some(self.elapsed + self.config.cursor_blink);
        }
        if self.config.autostart {
            self.start();
        }
    }

    /// Install a key-click sink used when `sound` is enabled.
    pub fn set_key_click(&mut self, click: impl KeyClick + Send + 'static) {
        self.click = Some(Box::new(click));
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// Begin (or no-op if already running). Fires `on_start` with the
    /// current word, then executes the first step immediately.
    pub fn start(&mut self) {
        if self.inert || self.destroyed || self.running {
            return;
        }
        self.running = true;
        self.paused = false;
        let word = self.current_word().to_string();
        crate::debug!("typewriter: start at word `{word}`");
        Hooks::fire_word(&mut self.hooks.on_start, &word);
        self.fire_step();
    }

    /// Halt. Fires `on_stop`. The armed step, if any, dies on its flag
    /// check rather than being revoked.
    pub fn stop(&mut self) {
        if self.inert || self.destroyed {
            return;
        }
        self.running = false;
        self.paused = false;
        crate::debug!("typewriter: stop");
        Hooks::fire(&mut self.hooks.on_stop);
    }

    /// Freeze progress. The armed step fires but does nothing and does not
    /// re-arm; the cursor keeps its current visibility.
    pub fn pause(&mut self) {
        if self.inert || self.destroyed {
            return;
        }
        self.paused = true;
    }

    /// Resume from the exact paused position, executing a step immediately
    /// rather than waiting for the next natural deadline.
    pub fn resume(&mut self) {
        if self.inert || self.destroyed {
            return;
        }
        if self.paused && self.running {
            self.paused = false;
            // The paused-era deadline would double-step on top of the
            // immediate re-fire; drop it.
            self.deadlines.step = None;
            self.fire_step();
        }
    }

    /// Tear down: stop, cancel every deadline, remove the cursor glyph,
    /// and detach the surface (restoring its pre-attachment form). The
    /// engine is unusable afterwards; further calls and ticks are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if !self.inert {
            self.stop();
            self.surface.set_cursor_glyph(None);
            self.surface.detach();
        }
        self.deadlines = Deadlines::default();
        self.effect = None;
        self.destroyed = true;
    }

    // -----------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------

    /// Advance engine time by `dt` and fire every deadline inside that
    /// window, in deadline order (effect before blink before step on
    /// ties). Virtual time moves to each deadline as it fires, so
    /// re-armed delays chain from their scheduled instant and a large
    /// `dt` replays the exact timeline a chain of small ticks would.
    pub fn tick(&mut self, dt: Duration) {
        if self.inert || self.destroyed {
            return;
        }
        let target = self.elapsed.saturating_add(dt);
        while let Some((kind, at)) = self.earliest_armed() {
            if at > target {
                break;
            }
            self.elapsed = at;
            match kind {
                DeadlineKind::Effect => self.fire_effect(),
                DeadlineKind::Blink => self.fire_blink(),
                DeadlineKind::Step => self.fire_step(),
            }
            if self.destroyed {
                return;
            }
        }
        self.elapsed = target;
    }

    /// Time until the earliest armed deadline, if any. Drivers sleep this
    /// long instead of polling.
    #[must_use]
    pub fn time_to_next(&self) -> Option<Duration> {
        if self.inert || self.destroyed {
            return None;
        }
        [
            self.deadlines.effect,
            self.deadlines.blink,
            self.deadlines.step,
        ]
        .into_iter()
        .flatten()
        .min()
        .map(|at| at.saturating_sub(self.elapsed))
    }

    fn earliest_armed(&self) -> Option<(DeadlineKind, Duration)> {
        let candidates = [
            (self.deadlines.effect, DeadlineKind::Effect),
            (self.deadlines.blink, DeadlineKind::Blink),
            (self.deadlines.step, DeadlineKind::Step),
        ];
        let mut best: Option<(Duration, DeadlineKind)> = None;
        for (deadline, kind) in candidates {
            if let Some(at) = deadline {
                if best.is_none_or(|(b, _)| at < b) {
                    best = Some((at, kind));
                }
            }
        }
        best.map(|(at, kind)| (kind, at))
    }

    // -----------------------------------------------------------------
    // Step state machine
    // -----------------------------------------------------------------

    fn fire_step(&mut self) {
        self.deadlines.step = None;
        if self.destroyed || self.inert || !self.running || self.paused {
            return;
        }

        let word = self.current_word().to_string();
        let len = word.graphemes(true).count();

        match self.phase {
            Phase::Typing => {
                if self.char_index < len {
                    self.char_index += 1;
                    self.render_reveal(&word);
                    self.play_click();
                }
                if self.char_index >= len {
                    // Word complete: hold, then start deleting.
                    Hooks::fire_word(&mut self.hooks.on_word_complete, &word);
                    self.phase = Phase::Deleting;
                    self.arm_step(self.config.delay_between_words);
                } else {
                    let delay = self.step_delay(self.config.type_speed);
                    self.arm_step(delay);
                }
            }
            Phase::Deleting => {
                if self.char_index > 0 {
                    self.char_index -= 1;
                    self.render_plain(&word);
                }
                if self.char_index == 0 {
                    Hooks::fire(&mut self.hooks.on_delete_start);
                    self.phase = Phase::Typing;
                    if self.word_index + 1 >= self.words.len() {
                        // Past the last word. The index stays in bounds
                        // either way.
                        if self.config.loop_words {
                            self.word_index = 0;
                            Hooks::fire(&mut self.hooks.on_loop_restart);
                        } else {
                            self.stop();
                            return;
                        }
                    } else {
                        self.word_index += 1;
                    }
                }
                let delay = self.step_delay(self.config.delete_speed);
                self.arm_step(delay);
            }
        }
    }

    fn arm_step(&mut self, delay: Duration) {
        self.deadlines.step = Some(self.elapsed + delay);
    }

    fn step_delay(&mut self, base: Duration) -> Duration {
        if self.config.jitter {
            jittered(base, &mut self.rng)
        } else {
            base
        }
    }

    fn play_click(&mut self) {
        if !self.config.sound {
            return;
        }
        if let Some(click) = self.click.as_mut() {
            click.click();
        }
    }

    // -----------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------

    fn prefix(&self, word: &str) -> Vec<String> {
        word.graphemes(true)
            .take(self.char_index)
            .map(str::to_string)
            .collect()
    }

    fn render_reveal(&mut self, word: &str) {
        let prefix = self.prefix(word);
        match Strategy::select(&self.config) {
            Strategy::Plain => {
                self.clear_effect();
                self.surface.draw(&effects::settled_run(&prefix));
            }
            Strategy::Scramble => {
                let settled = prefix.len().saturating_sub(1);
                self.effect = Some(EffectRun::Scramble(ScrambleRun::new(prefix, settled)));
                self.deadlines.effect = Some(self.elapsed + SCRAMBLE_TICK);
            }
            Strategy::FadeIn => {
                let run = FadeRun::new(prefix, self.elapsed);
                self.surface.draw(&run.frame(self.elapsed));
                self.effect = Some(EffectRun::Fade(run));
                self.deadlines.effect = Some(self.elapsed + FADE_TICK);
            }
        }
    }

    /// Deletion always renders plain; reveal strategies apply to reveals
    /// only. An in-flight effect is abandoned.
    fn render_plain(&mut self, word: &str) {
        self.clear_effect();
        let prefix = self.prefix(word);
        self.surface.draw(&effects::settled_run(&prefix));
    }

    fn clear_effect(&mut self) {
        self.effect = None;
        self.deadlines.effect = None;
    }

    fn fire_effect(&mut self) {
        self.deadlines.effect = None;
        match self.effect.take() {
            Some(EffectRun::Scramble(mut run)) => {
                let frame = run.advance(&mut self.rng);
                self.surface.draw(&frame);
                if !run.is_complete() {
                    self.effect = Some(EffectRun::Scramble(run));
                    self.deadlines.effect = Some(self.elapsed + SCRAMBLE_TICK);
                }
            }
            Some(EffectRun::Fade(run)) => {
                let frame = run.frame(self.elapsed);
                self.surface.draw(&frame);
                if !run.is_complete(self.elapsed) {
                    self.effect = Some(EffectRun::Fade(run));
                    self.deadlines.effect = Some(self.elapsed + FADE_TICK);
                }
            }
            None => {}
        }
    }

    fn fire_blink(&mut self) {
        self.deadlines.blink = None;
        if !self.config.cursor {
            return;
        }
        // Blinking freezes while paused but the interval keeps running.
        if !self.paused {
            self.cursor_visible = !self.cursor_visible;
            self.surface.set_cursor_visible(self.cursor_visible);
        }
        self.deadlines.blink = Some(self.elapsed + self.config.cursor_blink);
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Whether the engine is running (may simultaneously be paused).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether progress is frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether construction degraded to a no-op engine.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Whether `destroy()` has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Current phase of the cycle.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the word currently cycling.
    #[must_use]
    pub fn word_index(&self) -> usize {
        self.word_index
    }

    /// Revealed grapheme count of the current word.
    #[must_use]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// The word currently cycling.
    #[must_use]
    pub fn current_word(&self) -> &str {
        &self.words[self.word_index]
    }

    /// The resolved word list.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether this configuration wants hover-driven pause/resume.
    #[must_use]
    pub fn pause_on_hover(&self) -> bool {
        self.config.pause_on_hover
    }

    /// Borrow the render target.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the render target.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
