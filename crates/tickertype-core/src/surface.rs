#![forbid(unsafe_code)]

//! Render-target abstraction.
//!
//! The engine borrows a [`Surface`] supplied by the caller and pushes glyph
//! runs into it; it never owns the display. A surface is one text row plus
//! an optional cursor indicator slot the engine controls.
//!
//! Detach contract: [`Surface::detach`] must restore the surrounding
//! presentation to its pre-attachment form — clear the written row and drop
//! the cursor glyph. After detach, `is_attached` reports false and further
//! draw calls are ignored by the implementation.

/// One rendered grapheme cluster with a display intensity.
///
/// Intensity is in `[0.0, 1.0]`; `1.0` is fully settled text. The fade-in
/// strategy emits partial intensities, everything else emits `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// A single grapheme cluster.
    pub text: String,
    /// Display intensity in `[0.0, 1.0]`.
    pub intensity: f32,
}

impl Glyph {
    /// A fully settled glyph.
    #[must_use]
    pub fn settled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intensity: 1.0,
        }
    }

    /// A glyph at a given intensity (clamped to `[0.0, 1.0]`).
    #[must_use]
    pub fn faded(text: impl Into<String>, intensity: f32) -> Self {
        Self {
            text: text.into(),
            intensity: intensity.clamp(0.0, 1.0),
        }
    }
}

/// A one-row text display the engine renders into.
pub trait Surface {
    /// Replace the displayed run with `glyphs`.
    fn draw(&mut self, glyphs: &[Glyph]);

    /// Install or remove the cursor indicator glyph.
    fn set_cursor_glyph(&mut self, glyph: Option<&str>);

    /// Show or hide the cursor indicator.
    fn set_cursor_visible(&mut self, visible: bool);

    /// Whether the surface is attached to a live display.
    fn is_attached(&self) -> bool {
        true
    }

    /// Restore the pre-attachment presentation and detach.
    fn detach(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw(&mut self, glyphs: &[Glyph]) {
        (**self).draw(glyphs);
    }

    fn set_cursor_glyph(&mut self, glyph: Option<&str>) {
        (**self).set_cursor_glyph(glyph);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        (**self).set_cursor_visible(visible);
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn detach(&mut self) {
        (**self).detach();
    }
}
