//! Visual styling: [`Color`], [`AttrMask`], and [`Style`].

use std::fmt;
use std::ops::BitOr;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB), or the terminal's
/// default colour, which sits outside the RGB range so `#000000` stays black.
///
/// With the `serde` feature, colours (de)serialize as `"#rrggbb"` strings,
/// with `"default"` for [`Color::DEFAULT`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color(pub u32);

impl Color {
    /// The terminal's default colour.
    pub const DEFAULT: Self = Self(1 << 24);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub const fn is_default(self) -> bool {
        self.0 == Self::DEFAULT.0
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn parse_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ColorError(s.to_string()))
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            return f.write_str("default");
        }
        write!(f, "#{:06x}", self.0 & 0xFF_FFFF)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().eq_ignore_ascii_case("default") {
            return Ok(Self::DEFAULT);
        }
        Self::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// A string that is not a `#rrggbb` colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorError(pub String);

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour \u{201c}{}\u{201d}, expected #rrggbb", self.0)
    }
}

impl std::error::Error for ColorError {}

// ---------------------------------------------------------------------------
// AttrMask
// ---------------------------------------------------------------------------

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrMask(pub u32);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const DIM: Self = Self(1 << 1);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Complete visual style for a single glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0xAB, 0xCD, 0xEF);
        assert_eq!((c.r(), c.g(), c.b()), (0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn parse_hex_accepts_both_forms() {
        assert_eq!(Color::parse_hex("#ff8000"), Ok(Color::from_rgb(255, 128, 0)));
        assert_eq!(Color::parse_hex("40E0D0"), Ok(Color::from_rgb(64, 224, 208)));
        assert_eq!(Color::from_rgb(128, 0, 128).to_string(), "#800080");
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert!(Color::parse_hex("#fff").is_err());
        assert!(Color::parse_hex("#gg0000").is_err());
        assert!(Color::parse_hex("").is_err());
        assert!(Color::parse_hex("#+12345").is_err());
    }

    #[test]
    fn black_is_not_the_default_colour() {
        let black = Color::from_rgb(0, 0, 0);
        assert_ne!(black, Color::DEFAULT);
        assert!(!black.is_default());
        assert_eq!(Color::parse_hex("#000000"), Ok(black));
        assert_eq!(black.to_string(), "#000000");
        assert_eq!(Color::default(), Color::DEFAULT);
        assert_eq!(Color::DEFAULT.to_string(), "default");
        assert_eq!(Color::try_from("default".to_string()), Ok(Color::DEFAULT));
    }

    #[test]
    fn style_builder() {
        let s = Style::default()
            .with_fg(Color::from_rgb(255, 0, 0))
            .with_bg(Color::from_rgb(0, 0, 0))
            .with_attrs(AttrMask::BOLD | AttrMask::DIM);
        assert_eq!(s.fg.r(), 255);
        assert!(s.attrs.contains(AttrMask::BOLD));
        assert!(s.attrs.contains(AttrMask::DIM));
        assert!(!AttrMask::NONE.contains(AttrMask::BOLD));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn color_serializes_as_hex_string() {
        let c = Color::from_rgb(0, 255, 0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#00ff00\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Color>("\"green\"").is_err());
    }
}
