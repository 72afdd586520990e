use pathviz_core::{Point, Range};

use crate::state::CellState;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One square of the board.
///
/// The neighbour list is a cache: it reflects barriers as they were at the
/// last [`Board::update_neighbors`] and goes stale on any later edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    state: CellState,
    neighbors: Vec<Point>,
}

impl Cell {
    fn new(pos: Point) -> Self {
        Self {
            pos,
            state: CellState::Empty,
            neighbors: Vec::with_capacity(4),
        }
    }

    /// Position; `x` is the column and `y` the row.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.pos.y as usize
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.pos.x as usize
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Cached passable neighbours, in up, down, left, right order.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    // State setters overwrite unconditionally; keeping a single Start and
    // End is the editor's job.

    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub fn mark_barrier(&mut self) {
        self.state = CellState::Barrier;
    }

    pub fn mark_start(&mut self) {
        self.state = CellState::Start;
    }

    pub fn mark_end(&mut self) {
        self.state = CellState::End;
    }

    pub fn mark_open(&mut self) {
        self.state = CellState::Open;
    }

    pub fn mark_closed(&mut self) {
        self.state = CellState::Closed;
    }

    pub fn mark_path(&mut self) {
        self.state = CellState::Path;
    }

    pub fn reset(&mut self) {
        self.state = CellState::Empty;
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A square grid of [`Cell`]s, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an `n`×`n` board of empty cells.
    pub fn new(n: usize) -> Self {
        let cells = Range::square(n as i32).iter().map(Cell::new).collect();
        Self { size: n, cells }
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn range(&self) -> Range {
        Range::square(self.size as i32)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// Flat row-major index of `p`, or `None` outside the board.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.size + p.x as usize)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index(p).map(move |i| &mut self.cells[i])
    }

    pub fn state(&self, p: Point) -> Option<CellState> {
        self.cell(p).map(Cell::state)
    }

    /// Overwrite the state at `p`. Returns `false` if `p` is off the board.
    pub fn set_state(&mut self, p: Point, state: CellState) -> bool {
        match self.cell_mut(p) {
            Some(c) => {
                c.set_state(state);
                true
            }
            None => false,
        }
    }

    /// Cached neighbours of `p`; empty off the board.
    #[inline]
    pub fn neighbors(&self, p: Point) -> &[Point] {
        self.cell(p).map(Cell::neighbors).unwrap_or(&[])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Compute the passable neighbours of `p` from the current states:
    /// up to four cells, up, down, left, right, skipping barriers and
    /// anything off the board.
    pub fn neighbors_of(&self, p: Point) -> Vec<Point> {
        p.cardinal()
            .into_iter()
            .filter(|&n| self.cell(n).is_some_and(|c| !c.is_barrier()))
            .collect()
    }

    /// Recompute every cell's cached neighbour list. Must run after editing
    /// and before each search.
    pub fn update_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let ns = self.neighbors_of(self.cells[i].pos);
            self.cells[i].neighbors = ns;
        }
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// First cell in `state`, in row-major order.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.cells.iter().find(|c| c.state == state).map(Cell::pos)
    }

    /// Turn every Open, Closed and Path cell back to Empty.
    pub fn clear_search(&mut self) {
        for c in self.cells.iter_mut().filter(|c| c.state.is_search_mark()) {
            c.reset();
        }
    }

    /// Reset every cell to Empty and drop all cached neighbours.
    pub fn reset(&mut self) {
        *self = Self::new(self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty_and_positions_match_slots() {
        let b = Board::new(4);
        assert_eq!(b.len(), 16);
        assert_eq!(b.count(CellState::Empty), 16);
        for (i, row) in b.rows().enumerate() {
            for (j, c) in row.iter().enumerate() {
                assert_eq!((c.row(), c.col()), (i, j));
            }
        }
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let b = Board::new(3);
        assert_eq!(b.neighbors_of(Point::new(0, 0)), vec![Point::new(0, 1), Point::new(1, 0)]);
        assert_eq!(b.neighbors_of(Point::new(1, 1)).len(), 4);
        assert_eq!(b.neighbors_of(Point::new(2, 2)), vec![Point::new(2, 1), Point::new(1, 2)]);
        for c in b.cells() {
            for n in b.neighbors_of(c.pos()) {
                assert!(b.contains(n));
            }
        }
    }

    #[test]
    fn neighbors_skip_barriers() {
        let mut b = Board::new(3);
        b.set_state(Point::new(1, 0), CellState::Barrier);
        b.set_state(Point::new(1, 2), CellState::Barrier);
        let ns = b.neighbors_of(Point::new(1, 1));
        assert_eq!(ns, vec![Point::new(0, 1), Point::new(2, 1)]);
        for c in b.cells() {
            for n in b.neighbors_of(c.pos()) {
                assert_ne!(b.state(n), Some(CellState::Barrier));
            }
        }
    }

    #[test]
    fn neighbor_cache_is_stale_until_updated() {
        let mut b = Board::new(2);
        b.update_neighbors();
        assert_eq!(b.neighbors(Point::ZERO).len(), 2);
        b.set_state(Point::new(1, 0), CellState::Barrier);
        assert_eq!(b.neighbors(Point::ZERO).len(), 2);
        b.update_neighbors();
        assert_eq!(b.neighbors(Point::ZERO), &[Point::new(0, 1)]);
        assert!(b.neighbors(Point::new(5, 5)).is_empty());
    }

    #[test]
    fn setters_overwrite_without_validation() {
        let mut b = Board::new(2);
        let c = b.cell_mut(Point::ZERO).unwrap();
        c.mark_barrier();
        c.mark_start();
        assert!(c.is_start());
        c.mark_open();
        c.mark_closed();
        c.mark_path();
        assert_eq!(c.state(), CellState::Path);
        c.mark_end();
        assert!(c.is_end());
        c.reset();
        assert_eq!(c.state(), CellState::Empty);
        assert!(!b.set_state(Point::new(2, 0), CellState::Start));
    }

    #[test]
    fn clear_search_keeps_edits() {
        let mut b = Board::new(2);
        b.set_state(Point::new(0, 0), CellState::Start);
        b.set_state(Point::new(1, 0), CellState::Open);
        b.set_state(Point::new(0, 1), CellState::Barrier);
        b.set_state(Point::new(1, 1), CellState::Path);
        b.clear_search();
        assert_eq!(b.find(CellState::Start), Some(Point::ZERO));
        assert_eq!(b.count(CellState::Barrier), 1);
        assert_eq!(b.count(CellState::Empty), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let mut b = Board::new(3);
        b.set_state(Point::new(2, 2), CellState::End);
        b.update_neighbors();
        b.reset();
        assert_eq!(b, Board::new(3));
        assert_eq!(b.find(CellState::End), None);
    }
}
