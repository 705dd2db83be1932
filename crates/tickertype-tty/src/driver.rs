#![forbid(unsafe_code)]

//! Event/deadline multiplexing loop.
//!
//! A [`Driver`] carries any number of engines bound to [`TtySurface`]
//! regions and runs them cooperatively: sleep until the earliest engine
//! deadline, drain one input event if any arrived, advance every engine by
//! real elapsed time. Hover-pausing engines get pointer-enter/leave
//! transitions from mouse-motion hit tests against their surface regions;
//! terminal focus loss pauses them and focus gain resumes them.
//!
//! # Invariants
//!
//! 1. Engines tick from one place only — the driver loop — so all engine
//!    mutation stays on this thread.
//! 2. `shutdown` destroys every engine; the loop always shuts down before
//!    returning.
//! 3. A hover transition fires `pause`/`resume` once per boundary
//!    crossing, not per mouse-move event.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use tickertype_core::Typewriter;

use crate::session::TtySession;
use crate::surface::TtySurface;

/// Poll cadence when no deadline is armed but engines are alive (all
/// paused, or frozen by hover).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Cooperative runner for a set of engines.
pub struct Driver<W: Write> {
    engines: Vec<Typewriter<TtySurface<W>>>,
    hovered: Vec<bool>,
}

impl<W: Write> Default for Driver<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Driver<W> {
    /// An empty driver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engines: Vec::new(),
            hovered: Vec::new(),
        }
    }

    /// Add an engine to the set.
    pub fn add(&mut self, engine: Typewriter<TtySurface<W>>) {
        self.engines.push(engine);
        self.hovered.push(false);
    }

    /// The engines, for inspection.
    #[must_use]
    pub fn engines(&self) -> &[Typewriter<TtySurface<W>>] {
        &self.engines
    }

    /// Whether any engine wants mouse capture.
    #[must_use]
    pub fn wants_mouse(&self) -> bool {
        self.engines.iter().any(Typewriter::pause_on_hover)
    }

    /// Time until the earliest deadline across all engines.
    #[must_use]
    pub fn earliest_wakeup(&self) -> Option<Duration> {
        self.engines
            .iter()
            .filter_map(Typewriter::time_to_next)
            .min()
    }

    /// Whether any engine could still make progress.
    #[must_use]
    pub fn any_live(&self) -> bool {
        self.engines
            .iter()
            .any(|e| !e.is_destroyed() && !e.is_inert() && e.is_running())
    }

    /// Advance every engine by `dt`.
    pub fn tick_all(&mut self, dt: Duration) {
        for engine in &mut self.engines {
            engine.tick(dt);
        }
    }

    /// Destroy every engine.
    pub fn shutdown(&mut self) {
        for engine in &mut self.engines {
            engine.destroy();
        }
    }

    /// React to one input event.
    pub fn handle_event(&mut self, event: &Event) -> Control {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Control::Quit,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Control::Quit
                }
                _ => Control::Continue,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                self.pointer_moved(mouse.column, mouse.row);
                Control::Continue
            }
            Event::FocusLost => {
                self.for_hover_engines(Typewriter::pause);
                Control::Continue
            }
            Event::FocusGained => {
                self.for_hover_engines(Typewriter::resume);
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    fn for_hover_engines(&mut self, f: fn(&mut Typewriter<TtySurface<W>>)) {
        for engine in &mut self.engines {
            if engine.pause_on_hover() {
                f(engine);
            }
        }
    }

    fn pointer_moved(&mut self, col: u16, row: u16) {
        for (engine, hovered) in self.engines.iter_mut().zip(&mut self.hovered) {
            if !engine.pause_on_hover() {
                continue;
            }
            let inside = engine.surface().region().contains(col, row);
            if inside && !*hovered {
                *hovered = true;
                engine.pause();
            } else if !inside && *hovered {
                *hovered = false;
                engine.resume();
            }
        }
    }
}

impl Driver<io::Stdout> {
    /// Run until every engine halts or the user quits, then destroy all
    /// engines.
    pub fn run(&mut self, session: &TtySession) -> io::Result<()> {
        let mut last = Instant::now();
        loop {
            let wait = match self.earliest_wakeup() {
                Some(wait) => wait,
                None if self.any_live() => IDLE_POLL,
                None => break,
            };
            if session.poll(wait)? {
                let event = session.read()?;
                if self.handle_event(&event) == Control::Quit {
                    break;
                }
            }
            let now = Instant::now();
            self.tick_all(now.duration_since(last));
            last = now;
        }
        self.shutdown();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};
    use tickertype_core::Options;

    use crate::surface::Region;

    fn test_engine(
        region: Region,
        options: Options,
    ) -> Typewriter<TtySurface<Vec<u8>>> {
        let surface = TtySurface::with_writer(Vec::new(), region);
        Typewriter::new(surface, options.jitter(false).cursor(false).seed(1))
    }

    fn moved(col: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn quit_keys_quit() {
        let mut driver: Driver<Vec<u8>> = Driver::new();
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
            assert_eq!(driver.handle_event(&event), Control::Quit);
        }
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(driver.handle_event(&ctrl_c), Control::Quit);
    }

    #[test]
    fn other_keys_continue() {
        let mut driver: Driver<Vec<u8>> = Driver::new();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(driver.handle_event(&event), Control::Continue);
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new().words(["hello"]).pause_on_hover(true),
        ));

        driver.handle_event(&moved(3, 0));
        assert!(driver.engines()[0].is_paused());

        // Motion inside the region does not re-fire the transition.
        driver.handle_event(&moved(4, 0));
        assert!(driver.engines()[0].is_paused());

        driver.handle_event(&moved(3, 5));
        assert!(!driver.engines()[0].is_paused());
    }

    #[test]
    fn hover_ignored_without_opt_in() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new().words(["hello"]),
        ));
        driver.handle_event(&moved(3, 0));
        assert!(!driver.engines()[0].is_paused());
    }

    #[test]
    fn hover_hits_only_matching_region() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new().words(["one"]).pause_on_hover(true),
        ));
        driver.add(test_engine(
            Region::new(0, 2, 10),
            Options::new().words(["two"]).pause_on_hover(true),
        ));

        driver.handle_event(&moved(5, 2));
        assert!(!driver.engines()[0].is_paused());
        assert!(driver.engines()[1].is_paused());
    }

    #[test]
    fn focus_loss_pauses_and_gain_resumes_hover_engines() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new().words(["one"]).pause_on_hover(true),
        ));
        driver.add(test_engine(
            Region::new(0, 1, 10),
            Options::new().words(["two"]),
        ));

        driver.handle_event(&Event::FocusLost);
        assert!(driver.engines()[0].is_paused());
        assert!(!driver.engines()[1].is_paused());

        driver.handle_event(&Event::FocusGained);
        assert!(!driver.engines()[0].is_paused());
    }

    #[test]
    fn earliest_wakeup_is_minimum_across_engines() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new()
                .words(["aaaa"])
                .type_speed(Duration::from_millis(300)),
        ));
        driver.add(test_engine(
            Region::new(0, 1, 10),
            Options::new()
                .words(["bbbb"])
                .type_speed(Duration::from_millis(40)),
        ));
        assert_eq!(driver.earliest_wakeup(), Some(Duration::from_millis(40)));
    }

    #[test]
    fn tick_all_advances_every_engine() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new().words(["ab"]).type_speed(Duration::from_millis(10)),
        ));
        driver.add(test_engine(
            Region::new(0, 1, 10),
            Options::new().words(["cd"]).type_speed(Duration::from_millis(10)),
        ));
        driver.tick_all(Duration::from_millis(10));
        assert_eq!(driver.engines()[0].char_index(), 2);
        assert_eq!(driver.engines()[1].char_index(), 2);
    }

    #[test]
    fn shutdown_destroys_all() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new().words(["ab"]),
        ));
        driver.shutdown();
        assert!(driver.engines()[0].is_destroyed());
        assert!(!driver.any_live());
    }

    #[test]
    fn wants_mouse_only_with_hover_engines() {
        let mut driver = Driver::new();
        driver.add(test_engine(
            Region::new(0, 0, 10),
            Options::new().words(["ab"]),
        ));
        assert!(!driver.wants_mouse());
        driver.add(test_engine(
            Region::new(0, 1, 10),
            Options::new().words(["cd"]).pause_on_hover(true),
        ));
        assert!(driver.wants_mouse());
    }
}
