//! Screen geometry: where each board cell sits in the terminal.

use pathviz_core::{Point, Range};

/// Narrowest screen the status line is given, whatever the board size.
pub const MIN_STATUS_WIDTH: i32 = 48;

/// Board cells are `cell_width` columns by one row, starting at the top-left
/// corner, with a single status line under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    size: i32,
    cell_width: i32,
}

impl Layout {
    pub fn new(size: usize, cell_width: i32) -> Self {
        Self {
            size: size as i32,
            cell_width: cell_width.max(1),
        }
    }

    #[inline]
    pub fn cell_width(&self) -> i32 {
        self.cell_width
    }

    /// Columns covered by the board.
    pub fn board_width(&self) -> i32 {
        self.size * self.cell_width
    }

    /// Columns of the whole screen.
    pub fn width(&self) -> i32 {
        self.board_width().max(MIN_STATUS_WIDTH)
    }

    /// Rows of the whole screen: the board plus the status line.
    pub fn height(&self) -> i32 {
        self.size + 1
    }

    /// Screen area covered by the board.
    pub fn board(&self) -> Range {
        Range::new(0, 0, self.board_width(), self.size)
    }

    /// The status line.
    pub fn status_line(&self) -> Range {
        Range::new(0, self.size, self.width(), self.size + 1)
    }

    /// Top-left screen position of `cell`.
    pub fn origin(&self, cell: Point) -> Point {
        Point::new(cell.x * self.cell_width, cell.y)
    }

    /// The board cell under screen position `pos`, if any.
    pub fn cell_at(&self, pos: Point) -> Option<Point> {
        if !self.board().contains(pos) {
            return None;
        }
        Some(Point::new(pos.x / self.cell_width, pos.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions() {
        let l = Layout::new(20, 2);
        assert_eq!((l.board_width(), l.width(), l.height()), (40, 48, 21));
        let l = Layout::new(30, 3);
        assert_eq!((l.width(), l.height()), (90, 31));
        assert_eq!(l.status_line(), Range::new(0, 30, 90, 31));
    }

    #[test]
    fn cell_at_maps_both_columns_of_a_cell() {
        let l = Layout::new(5, 2);
        assert_eq!(l.cell_at(Point::new(0, 0)), Some(Point::new(0, 0)));
        assert_eq!(l.cell_at(Point::new(1, 0)), Some(Point::new(0, 0)));
        assert_eq!(l.cell_at(Point::new(7, 3)), Some(Point::new(3, 3)));
        assert_eq!(l.cell_at(Point::new(9, 4)), Some(Point::new(4, 4)));
    }

    #[test]
    fn cell_at_rejects_positions_off_the_board() {
        let l = Layout::new(5, 2);
        assert_eq!(l.cell_at(Point::new(10, 0)), None);
        assert_eq!(l.cell_at(Point::new(0, 5)), None);
        assert_eq!(l.cell_at(Point::new(-1, 0)), None);
    }

    #[test]
    fn origin_inverts_cell_at() {
        let l = Layout::new(8, 3);
        for cell in Range::square(8) {
            assert_eq!(l.cell_at(l.origin(cell)), Some(cell));
        }
    }
}
