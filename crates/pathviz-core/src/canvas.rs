//! The [`Canvas`] type: an owned screen buffer of [`Glyph`]s, plus the
//! [`Frame`] diff that drivers flush.

use crate::geom::{Point, Range};
use crate::glyph::Glyph;
use crate::style::Style;

/// A row-major 2D buffer of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    bounds: Range,
}

impl Canvas {
    /// Create a canvas of the given dimensions, filled with blank glyphs.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            glyphs: vec![Glyph::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// Read the glyph at `p`; blank if `p` is outside the canvas.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside the canvas.
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    /// Fill every glyph of `rng` (clipped to the canvas) with `glyph`.
    pub fn fill(&mut self, rng: Range, glyph: Glyph) {
        for p in rng {
            self.set(p, glyph);
        }
    }

    /// Write `text` left to right starting at `p`, clipped at the right edge.
    /// Returns the number of glyphs written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if !self.contains(q) {
                break;
            }
            self.set(q, Glyph { ch, style });
            written += 1;
        }
        written
    }

    /// Copy every glyph of `src` into `self` where both overlap.
    pub fn copy_from(&mut self, src: &Canvas) {
        if src.bounds == self.bounds {
            self.glyphs.copy_from_slice(&src.glyphs);
            return;
        }
        for p in src.bounds {
            if self.contains(p) {
                self.set(p, src.at(p));
            }
        }
    }

    /// Row-major iterator over `(Point, Glyph)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Glyph)> + '_ {
        self.bounds.iter().zip(self.glyphs.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameGlyph / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between two canvases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameGlyph {
    pub glyph: Glyph,
    pub pos: Point,
}

/// The set of glyph changes a driver must paint.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub glyphs: Vec<FrameGlyph>,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Compute the glyphs of `curr` that differ from `prev`.
///
/// Points outside `prev` count as changed, so a first frame against an
/// empty canvas repaints everything.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let glyphs = curr
        .iter()
        .filter(|&(p, g)| !prev.contains(p) || prev.at(p) != g)
        .map(|(pos, glyph)| FrameGlyph { glyph, pos })
        .collect();
    Frame {
        glyphs,
        width: curr.width(),
        height: curr.height(),
    }
}
