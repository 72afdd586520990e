//! The [`Glyph`] type: one styled character on the screen.

use crate::style::Style;

/// A styled character occupying one terminal column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    /// A blank glyph with the given style.
    #[inline]
    pub const fn blank(style: Style) -> Self {
        Self { ch: ' ', style }
    }

    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self::blank(Style::default())
    }
}
