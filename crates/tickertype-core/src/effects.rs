#![forbid(unsafe_code)]

//! Character-reveal render strategies.
//!
//! The state machine decides *what* prefix is revealed; a strategy decides
//! *how* the surface gets there:
//!
//! - **Plain**: the prefix verbatim, full intensity.
//! - **Scramble**: the unsettled tail cycles through random symbols for a
//!   fixed iteration budget at a fast fixed cadence, then lands on the
//!   exact target. Settled characters never change mid-run.
//! - **Fade-in**: every character of the prefix ramps its intensity
//!   independently, staggered by a fixed per-character offset.
//!
//! # Invariants
//!
//! 1. A scramble run settles to the exact target after
//!    [`SCRAMBLE_ITERATIONS`] advances, for every PRNG state.
//! 2. Characters below the settled boundary are emitted verbatim in every
//!    scramble frame.
//! 3. Fade intensities are monotonically non-decreasing in time and reach
//!    1.0 after stagger + ramp.

use std::time::Duration;

use crate::config::Config;
use crate::rng::XorShift64;
use crate::surface::Glyph;

/// Symbols the scramble strategy substitutes before settling.
pub const SCRAMBLE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Randomized frames a scramble run renders before settling.
pub const SCRAMBLE_ITERATIONS: u32 = 10;

/// Cadence of scramble frames. Deliberately distinct from (and faster
/// than) the typing speed.
pub const SCRAMBLE_TICK: Duration = Duration::from_millis(30);

/// Per-character stagger for the fade-in strategy.
pub const FADE_STAGGER: Duration = Duration::from_millis(50);

/// Intensity ramp length for one fading character.
pub const FADE_RAMP: Duration = Duration::from_millis(300);

/// Redraw cadence while a fade is in flight.
pub const FADE_TICK: Duration = Duration::from_millis(33);

/// How a revealed prefix reaches the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Replace displayed text with the prefix verbatim.
    Plain,
    /// Randomized substitutions settling on the prefix.
    Scramble,
    /// Per-character staggered intensity ramp.
    FadeIn,
}

impl Strategy {
    /// Select the reveal strategy for a configuration. Scramble takes
    /// precedence when both effects are enabled.
    #[must_use]
    pub fn select(config: &Config) -> Self {
        if config.scramble {
            Self::Scramble
        } else if config.fade_in {
            Self::FadeIn
        } else {
            Self::Plain
        }
    }
}

/// Settled glyphs for a grapheme prefix.
#[must_use]
pub fn settled_run(graphemes: &[String]) -> Vec<Glyph> {
    graphemes.iter().map(Glyph::settled).collect()
}

// ---------------------------------------------------------------------------
// Scramble
// ---------------------------------------------------------------------------

/// An in-flight scramble toward a target prefix.
#[derive(Debug, Clone)]
pub struct ScrambleRun {
    target: Vec<String>,
    settled: usize,
    iterations: u32,
}

impl ScrambleRun {
    /// Start a run toward `target`. Characters below `settled` are
    /// emitted verbatim in every frame.
    #[must_use]
    pub fn new(target: Vec<String>, settled: usize) -> Self {
        Self {
            target,
            settled,
            iterations: 0,
        }
    }

    /// Produce the next frame. The final frame of the budget is the exact
    /// target.
    pub fn advance(&mut self, rng: &mut XorShift64) -> Vec<Glyph> {
        self.iterations += 1;
        if self.is_complete() {
            return settled_run(&self.target);
        }
        self.target
            .iter()
            .enumerate()
            .map(|(i, g)| {
                if i < self.settled {
                    Glyph::settled(g)
                } else {
                    Glyph::settled(random_symbol(rng).to_string())
                }
            })
            .collect()
    }

    /// Whether the run has used its iteration budget.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.iterations >= SCRAMBLE_ITERATIONS
    }

    /// The exact prefix this run settles on.
    #[must_use]
    pub fn target(&self) -> &[String] {
        &self.target
    }
}

fn random_symbol(rng: &mut XorShift64) -> char {
    SCRAMBLE_ALPHABET[rng.next_index(SCRAMBLE_ALPHABET.len())] as char
}

// ---------------------------------------------------------------------------
// Fade-in
// ---------------------------------------------------------------------------

/// An in-flight fade-in of a revealed prefix.
#[derive(Debug, Clone)]
pub struct FadeRun {
    target: Vec<String>,
    started_at: Duration,
}

impl FadeRun {
    /// Start fading `target` at engine time `started_at`.
    #[must_use]
    pub fn new(target: Vec<String>, started_at: Duration) -> Self {
        Self { target, started_at }
    }

    /// Glyphs with per-character intensity at engine time `now`.
    #[must_use]
    pub fn frame(&self, now: Duration) -> Vec<Glyph> {
        self.target
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let start = self.started_at + FADE_STAGGER.saturating_mul(i as u32);
                let intensity = if now <= start {
                    0.0
                } else {
                    ((now - start).as_secs_f32() / FADE_RAMP.as_secs_f32()).clamp(0.0, 1.0)
                };
                Glyph::faded(g, intensity)
            })
            .collect()
    }

    /// Whether every character has reached full intensity at `now`.
    #[must_use]
    pub fn is_complete(&self, now: Duration) -> bool {
        let last = self.target.len().saturating_sub(1) as u32;
        now >= self.started_at + FADE_STAGGER.saturating_mul(last) + FADE_RAMP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    // Disambiguate the local `Strategy` enum from proptest's `Strategy` trait
    // (both pulled in by the glob imports above).
    use super::Strategy;

    fn graphemes(word: &str) -> Vec<String> {
        use unicode_segmentation::UnicodeSegmentation;
        word.graphemes(true).map(str::to_string).collect()
    }

    fn text_of(glyphs: &[Glyph]) -> String {
        glyphs.iter().map(|g| g.text.as_str()).collect()
    }

    // --- Strategy selection ---

    #[test]
    fn plain_is_default_strategy() {
        assert_eq!(Strategy::select(&Config::default()), Strategy::Plain);
    }

    #[test]
    fn scramble_beats_fade_when_both_enabled() {
        let config = Config {
            scramble: true,
            fade_in: true,
            ..Config::default()
        };
        assert_eq!(Strategy::select(&config), Strategy::Scramble);
    }

    #[test]
    fn fade_selected_alone() {
        let config = Config {
            fade_in: true,
            ..Config::default()
        };
        assert_eq!(Strategy::select(&config), Strategy::FadeIn);
    }

    // --- Scramble ---

    #[test]
    fn scramble_settles_after_budget() {
        let mut rng = XorShift64::new(3);
        let mut run = ScrambleRun::new(graphemes("Rust"), 3);
        let mut last = Vec::new();
        for _ in 0..SCRAMBLE_ITERATIONS {
            last = run.advance(&mut rng);
        }
        assert!(run.is_complete());
        assert_eq!(text_of(&last), "Rust");
    }

    #[test]
    fn scramble_settled_prefix_is_stable_every_frame() {
        let mut rng = XorShift64::new(11);
        let mut run = ScrambleRun::new(graphemes("Rust"), 3);
        for _ in 0..SCRAMBLE_ITERATIONS {
            let frame = run.advance(&mut rng);
            assert_eq!(&text_of(&frame)[..3], "Rus");
        }
    }

    #[test]
    fn scramble_frames_before_budget_randomize_tail() {
        let mut rng = XorShift64::new(5);
        let mut run = ScrambleRun::new(graphemes("abcdef"), 0);
        // Across the pre-settle frames, at least one must differ from the
        // target (all-match across 9 frames of 6 symbols is astronomically
        // unlikely and this seed is fixed).
        let mut any_differs = false;
        for _ in 0..SCRAMBLE_ITERATIONS - 1 {
            if text_of(&run.advance(&mut rng)) != "abcdef" {
                any_differs = true;
            }
        }
        assert!(any_differs);
    }

    #[test]
    fn scramble_frame_symbols_come_from_alphabet() {
        let mut rng = XorShift64::new(21);
        let mut run = ScrambleRun::new(graphemes("xyz"), 0);
        let frame = run.advance(&mut rng);
        for glyph in frame {
            let ch = glyph.text.bytes().next().unwrap();
            assert!(SCRAMBLE_ALPHABET.contains(&ch));
        }
    }

    #[test]
    fn scramble_full_intensity_throughout() {
        let mut rng = XorShift64::new(2);
        let mut run = ScrambleRun::new(graphemes("ab"), 1);
        let frame = run.advance(&mut rng);
        assert!(frame.iter().all(|g| (g.intensity - 1.0).abs() < f32::EPSILON));
    }

    proptest! {
        #[test]
        fn scramble_always_settles_exactly(word in "[a-zA-Z ]{1,16}", seed in 1u64..) {
            let mut rng = XorShift64::new(seed);
            let target = graphemes(&word);
            let settled = target.len().saturating_sub(1);
            let mut run = ScrambleRun::new(target, settled);
            let mut last = Vec::new();
            for _ in 0..SCRAMBLE_ITERATIONS {
                last = run.advance(&mut rng);
            }
            prop_assert!(run.is_complete());
            prop_assert_eq!(text_of(&last), word);
        }
    }

    // --- Fade-in ---

    #[test]
    fn fade_starts_dark() {
        let run = FadeRun::new(graphemes("hey"), Duration::ZERO);
        let frame = run.frame(Duration::ZERO);
        assert!(frame.iter().all(|g| g.intensity == 0.0));
    }

    #[test]
    fn fade_first_char_ramps_before_later_chars() {
        let run = FadeRun::new(graphemes("hey"), Duration::ZERO);
        let frame = run.frame(Duration::from_millis(60));
        assert!(frame[0].intensity > frame[1].intensity);
        assert!(frame[1].intensity > frame[2].intensity || frame[2].intensity == 0.0);
    }

    #[test]
    fn fade_reaches_full_intensity() {
        let run = FadeRun::new(graphemes("hey"), Duration::ZERO);
        let done_at = FADE_STAGGER * 2 + FADE_RAMP;
        let frame = run.frame(done_at);
        assert!(frame.iter().all(|g| (g.intensity - 1.0).abs() < f32::EPSILON));
        assert!(run.is_complete(done_at));
    }

    #[test]
    fn fade_not_complete_mid_ramp() {
        let run = FadeRun::new(graphemes("hey"), Duration::ZERO);
        assert!(!run.is_complete(Duration::from_millis(100)));
    }

    #[test]
    fn fade_intensity_monotone_in_time() {
        let run = FadeRun::new(graphemes("abcd"), Duration::from_millis(20));
        let mut previous = vec![0.0f32; 4];
        for ms in (0..600).step_by(25) {
            let frame = run.frame(Duration::from_millis(ms));
            for (p, g) in previous.iter_mut().zip(&frame) {
                assert!(g.intensity >= *p, "intensity decreased at {ms}ms");
                *p = g.intensity;
            }
        }
    }

    #[test]
    fn fade_preserves_text() {
        let run = FadeRun::new(graphemes("héllo"), Duration::ZERO);
        let frame = run.frame(Duration::from_millis(10));
        assert_eq!(text_of(&frame), "héllo");
    }

    #[test]
    fn fade_single_char_completes_after_ramp() {
        let run = FadeRun::new(graphemes("x"), Duration::ZERO);
        assert!(run.is_complete(FADE_RAMP));
        assert!(!run.is_complete(FADE_RAMP - Duration::from_millis(1)));
    }

    // --- settled_run ---

    #[test]
    fn settled_run_preserves_order_and_intensity() {
        let run = settled_run(&graphemes("ab"));
        assert_eq!(text_of(&run), "ab");
        assert!(run.iter().all(|g| (g.intensity - 1.0).abs() < f32::EPSILON));
    }
}
