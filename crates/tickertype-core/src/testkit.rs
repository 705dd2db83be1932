#![forbid(unsafe_code)]

//! Test support: recording doubles for the engine's collaborator seams.
//!
//! Kept as a regular module (not `#[cfg(test)]`) so downstream crates and
//! integration tests can drive an engine without a terminal.

use crate::sound::KeyClick;
use crate::surface::{Glyph, Surface};

/// A [`Surface`] that records every call for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    frames: Vec<Vec<Glyph>>,
    cursor_glyph: Option<String>,
    cursor_visible: bool,
    cursor_toggles: usize,
    attached: bool,
    detach_count: usize,
}

impl RecordingSurface {
    /// An attached recording surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: true,
            ..Self::default()
        }
    }

    /// A surface that reports itself as detached from the start.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Every drawn frame, flattened to plain text.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|f| f.iter().map(|g| g.text.as_str()).collect())
            .collect()
    }

    /// The most recent drawn frame as plain text.
    #[must_use]
    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    /// The most recent drawn frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&[Glyph]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Number of draw calls so far.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.frames.len()
    }

    /// Currently installed cursor glyph.
    #[must_use]
    pub fn cursor_glyph(&self) -> Option<&str> {
        self.cursor_glyph.as_deref()
    }

    /// Current cursor visibility.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Number of `set_cursor_visible` calls.
    #[must_use]
    pub fn cursor_toggles(&self) -> usize {
        self.cursor_toggles
    }

    /// Number of `detach` calls.
    #[must_use]
    pub fn detach_count(&self) -> usize {
        self.detach_count
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, glyphs: &[Glyph]) {
        self.frames.push(glyphs.to_vec());
    }

    fn set_cursor_glyph(&mut self, glyph: Option<&str>) {
        self.cursor_glyph = glyph.map(str::to_string);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.cursor_toggles += 1;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach(&mut self) {
        self.attached = false;
        self.detach_count += 1;
        self.frames.push(Vec::new());
    }
}

/// A [`KeyClick`] that counts invocations through a shared handle, so the
/// count stays readable after the sink moves into an engine.
#[derive(Debug, Default)]
pub struct CountingClick {
    clicks: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

impl CountingClick {
    /// New counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that keeps reporting the count after the sink is moved.
    #[must_use]
    pub fn handle(&self) -> std::sync::Arc<std::sync::atomic::AtomicUsize> {
        std::sync::Arc::clone(&self.clicks)
    }

    /// Clicks played so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.clicks.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl KeyClick for CountingClick {
    fn click(&mut self) {
        self.clicks
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_surface_captures_frames_in_order() {
        let mut s = RecordingSurface::new();
        s.draw(&[Glyph::settled("a")]);
        s.draw(&[Glyph::settled("a"), Glyph::settled("b")]);
        assert_eq!(s.texts(), vec!["a".to_string(), "ab".to_string()]);
        assert_eq!(s.draw_count(), 2);
    }

    #[test]
    fn detached_surface_reports_unattached() {
        assert!(!RecordingSurface::detached().is_attached());
        assert!(RecordingSurface::new().is_attached());
    }

    #[test]
    fn detach_clears_display() {
        let mut s = RecordingSurface::new();
        s.draw(&[Glyph::settled("x")]);
        s.detach();
        assert_eq!(s.last_text(), Some(String::new()));
        assert_eq!(s.detach_count(), 1);
        assert!(!s.is_attached());
    }

    #[test]
    fn counting_click_counts() {
        let mut c = CountingClick::new();
        c.click();
        c.click();
        assert_eq!(c.count(), 2);
    }
}
