//! Text form of a [`Board`]: one line per row, one character per cell.
//!
//! ```text
//! S.#.
//! ..#.
//! ..#E
//! ....
//! ```
//!
//! `.` empty, `#` barrier, `S` start, `E` end. Search marks print as `o`
//! (open), `x` (closed) and `*` (path) and are accepted back by the parser.

use std::fmt;

use pathviz_core::Point;

use crate::board::Board;
use crate::state::CellState;

/// Errors that can occur when parsing a text board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No rows at all.
    Empty,
    /// A row's length differs from the number of rows.
    NotSquare { row: usize, len: usize, size: usize },
    /// A character with no [`CellState`] meaning.
    InvalidChar { ch: char, pos: Point },
    /// More than one `S`.
    DuplicateStart(Point),
    /// More than one `E`.
    DuplicateEnd(Point),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout: no rows"),
            Self::NotSquare { row, len, size } => {
                write!(f, "layout: row {row} has {len} cells, expected {size}")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout: invalid cell \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateStart(p) => write!(f, "layout: second start at {p}"),
            Self::DuplicateEnd(p) => write!(f, "layout: second end at {p}"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl Board {
    /// Parse a square text board. Blank lines and surrounding whitespace on
    /// each line are ignored. Neighbour lists are left empty.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }
        let size = rows.len();
        let mut board = Board::new(size);
        let mut start = None;
        let mut end = None;

        for (y, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size {
                return Err(LayoutError::NotSquare { row: y, len, size });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let state = CellState::from_char(ch).ok_or(LayoutError::InvalidChar { ch, pos })?;
                match state {
                    CellState::Start if start.replace(pos).is_some() => {
                        return Err(LayoutError::DuplicateStart(pos));
                    }
                    CellState::End if end.replace(pos).is_some() => {
                        return Err(LayoutError::DuplicateEnd(pos));
                    }
                    _ => {}
                }
                board.set_state(pos, state);
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row {
                write!(f, "{}", c.state().to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
