#![forbid(unsafe_code)]

//! Inline one-row render surface.
//!
//! A [`TtySurface`] owns a fixed region of one terminal row and repaints
//! it on every engine draw: glyphs scaled by intensity, then the cursor
//! indicator, then padding to erase residue from longer previous content.
//! Writes are best-effort; an I/O failure drops the frame, never the
//! engine.
//!
//! Shared presentational setup (hardware-cursor hide and attribute reset)
//! is registered process-wide under a fixed identifier, so any number of
//! surfaces performs it exactly once.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use tickertype_core::style;
use tickertype_core::surface::{Glyph, Surface};
use unicode_width::UnicodeWidthStr;

/// Registration key for the shared presentational setup.
pub const STYLE_GUARD_ID: &str = "tickertype-tty-presentation";

/// Fully settled glyph color.
const BASE_COLOR: (u8, u8, u8) = (0xE6, 0xE6, 0xE6);

/// Cursor indicator color, slightly dimmer than settled text.
const CURSOR_COLOR: (u8, u8, u8) = (0xA0, 0xA0, 0xA0);

/// The single terminal row region a surface owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Leftmost column.
    pub col: u16,
    /// Row.
    pub row: u16,
    /// Width in cells.
    pub width: u16,
}

impl Region {
    /// Create a region.
    #[must_use]
    pub fn new(col: u16, row: u16, width: u16) -> Self {
        Self { col, row, width }
    }

    /// Whether a terminal cell lies inside this region.
    #[must_use]
    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col.saturating_add(self.width)
    }
}

/// A crossterm-backed [`Surface`] bound to one row region.
#[derive(Debug)]
pub struct TtySurface<W: Write> {
    out: W,
    region: Region,
    glyphs: Vec<Glyph>,
    cursor_glyph: Option<String>,
    cursor_visible: bool,
    /// Cells painted by the previous frame, for residue erasure.
    painted: u16,
    attached: bool,
}

impl TtySurface<io::Stdout> {
    /// A surface writing to stdout.
    #[must_use]
    pub fn stdout(region: Region) -> Self {
        Self::with_writer(io::stdout(), region)
    }
}

impl<W: Write> TtySurface<W> {
    /// A surface writing to an arbitrary sink (tests use a byte buffer).
    pub fn with_writer(out: W, region: Region) -> Self {
        style::register_once(STYLE_GUARD_ID, || {
            let mut stdout = io::stdout();
            let _ = stdout.queue(crossterm::cursor::Hide);
            let _ = stdout.queue(ResetColor);
            let _ = stdout.flush();
        });
        Self {
            out,
            region,
            glyphs: Vec::new(),
            cursor_glyph: None,
            cursor_visible: true,
            painted: 0,
            attached: true,
        }
    }

    /// The row region this surface owns.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    fn scaled(intensity: f32, (r, g, b): (u8, u8, u8)) -> Color {
        let scale = |c: u8| (f32::from(c) * intensity.clamp(0.0, 1.0)) as u8;
        Color::Rgb {
            r: scale(r),
            g: scale(g),
            b: scale(b),
        }
    }

    fn repaint(&mut self) -> io::Result<()> {
        let Region { col, row, width } = self.region;
        self.out.queue(MoveTo(col, row))?;

        let mut used: u16 = 0;
        let mut current: Option<Color> = None;
        for glyph in &self.glyphs {
            let w = UnicodeWidthStr::width(glyph.text.as_str()) as u16;
            if w == 0 {
                continue;
            }
            if used + w > width {
                break;
            }
            let color = Self::scaled(glyph.intensity, BASE_COLOR);
            if current != Some(color) {
                self.out.queue(SetForegroundColor(color))?;
                current = Some(color);
            }
            self.out.queue(Print(glyph.text.as_str()))?;
            used += w;
        }

        if self.cursor_visible {
            if let Some(glyph) = &self.cursor_glyph {
                let w = UnicodeWidthStr::width(glyph.as_str()) as u16;
                if w > 0 && used + w <= width {
                    self.out
                        .queue(SetForegroundColor(Self::scaled(1.0, CURSOR_COLOR)))?;
                    self.out.queue(Print(glyph.as_str()))?;
                    used += w;
                }
            }
        }

        self.out.queue(ResetColor)?;
        for _ in used..self.painted.max(used) {
            self.out.queue(Print(" "))?;
        }
        self.painted = used;
        self.out.flush()
    }

    fn clear_region(&mut self) -> io::Result<()> {
        let Region { col, row, width } = self.region;
        self.out.queue(MoveTo(col, row))?;
        self.out.queue(ResetColor)?;
        for _ in 0..width.min(self.painted.max(1)) {
            self.out.queue(Print(" "))?;
        }
        self.painted = 0;
        self.out.flush()
    }
}

impl<W: Write> Surface for TtySurface<W> {
    fn draw(&mut self, glyphs: &[Glyph]) {
        if !self.attached {
            return;
        }
        self.glyphs = glyphs.to_vec();
        if let Err(_err) = self.repaint() {
            #[cfg(feature = "tracing")]
            tracing::debug!("surface repaint failed: {_err}");
        }
    }

    fn set_cursor_glyph(&mut self, glyph: Option<&str>) {
        if !self.attached {
            return;
        }
        self.cursor_glyph = glyph.map(str::to_string);
        if let Err(_err) = self.repaint() {
            #[cfg(feature = "tracing")]
            tracing::debug!("surface repaint failed: {_err}");
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if !self.attached {
            return;
        }
        if self.cursor_visible == visible {
            return;
        }
        self.cursor_visible = visible;
        if let Err(_err) = self.repaint() {
            #[cfg(feature = "tracing")]
            tracing::debug!("surface repaint failed: {_err}");
        }
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        // Restore the pre-attachment form: an empty region.
        let _ = self.clear_region();
        self.attached = false;
    }
}
