//! How cell states look on screen.

use pathviz_core::{AttrMask, Color, Glyph, Style};
use pathviz_search::CellState;

use crate::config::PaletteConfig;

/// Maps every [`CellState`] to the glyphs that paint one cell.
///
/// A cell is `cell_width` columns wide. Each state gets a solid background;
/// Empty cells carry a faint dot in their first column so the board still
/// reads as a grid, and Start/End are lettered.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    empty: Color,
    barrier: Color,
    start: Color,
    end: Color,
    open: Color,
    closed: Color,
    path: Color,
    grid_line: Color,
    status: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&PaletteConfig::default())
    }
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Self {
        Self {
            empty: config.empty,
            barrier: config.barrier,
            start: config.start,
            end: config.end,
            open: config.open,
            closed: config.closed,
            path: config.path,
            grid_line: config.grid_line,
            status: Style::default()
                .with_fg(config.status_fg)
                .with_bg(config.status_bg),
        }
    }

    /// Background colour of a cell in `state`.
    pub fn color(&self, state: CellState) -> Color {
        match state {
            CellState::Empty => self.empty,
            CellState::Barrier => self.barrier,
            CellState::Start => self.start,
            CellState::End => self.end,
            CellState::Open => self.open,
            CellState::Closed => self.closed,
            CellState::Path => self.path,
        }
    }

    /// The glyph for column `column` (0-based) of a cell in `state`.
    pub fn glyph(&self, state: CellState, column: i32) -> Glyph {
        let bg = Style::default().with_bg(self.color(state));
        let letter = bg
            .with_fg(Color::from_rgb(16, 16, 16))
            .with_attrs(AttrMask::BOLD);
        match (state, column) {
            (CellState::Empty, 0) => Glyph::blank(bg.with_fg(self.grid_line)).with_char('·'),
            (CellState::Start, 0) => Glyph::blank(letter).with_char('S'),
            (CellState::End, 0) => Glyph::blank(letter).with_char('E'),
            _ => Glyph::blank(bg),
        }
    }

    /// Style of the status line.
    pub fn status(&self) -> Style {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_its_own_colour() {
        let p = Palette::default();
        for (i, a) in CellState::ALL.into_iter().enumerate() {
            for b in CellState::ALL.into_iter().skip(i + 1) {
                assert_ne!(p.color(a), p.color(b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn glyphs_fill_with_state_background() {
        let p = Palette::default();
        for state in CellState::ALL {
            for column in 0..3 {
                assert_eq!(p.glyph(state, column).style.bg, p.color(state));
            }
        }
        assert_eq!(p.glyph(CellState::Empty, 0).ch, '·');
        assert_eq!(p.glyph(CellState::Empty, 1).ch, ' ');
        assert_eq!(p.glyph(CellState::Start, 0).ch, 'S');
        assert_eq!(p.glyph(CellState::End, 0).ch, 'E');
        assert_eq!(p.glyph(CellState::Path, 0).ch, ' ');
    }

    #[test]
    fn configured_colours_are_used() {
        let config = PaletteConfig {
            open: Color::from_rgb(1, 2, 3),
            ..PaletteConfig::default()
        };
        let p = Palette::from_config(&config);
        assert_eq!(p.color(CellState::Open), Color::from_rgb(1, 2, 3));
        assert_eq!(p.status().bg, config.status_bg);
    }
}
