//! Board editing: placing endpoints, painting and erasing barriers,
//! scattering random walls.

use pathviz_core::Point;
use pathviz_search::{Board, CellState};
use rand::Rng;

/// What a held mouse button does to the cells it passes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    /// Place Start, then End, then barriers.
    Paint,
    /// Reset cells to Empty.
    Erase,
}

/// Tracks the Start and End slots while the user edits a [`Board`].
///
/// The board holds at most one Start and one End as long as every edit goes
/// through an `Editor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    start: Option<Point>,
    end: Option<Point>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor for a board that already has endpoints, e.g. one loaded
    /// from a layout file.
    pub fn from_board(board: &Board) -> Self {
        Self {
            start: board.find(CellState::Start),
            end: board.find(CellState::End),
        }
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Whether both endpoints are placed.
    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Apply `brush` at `cell`. Returns whether the board changed.
    pub fn apply(&mut self, brush: Brush, board: &mut Board, cell: Point) -> bool {
        match brush {
            Brush::Paint => self.paint(board, cell),
            Brush::Erase => self.erase(board, cell),
        }
    }

    /// Main-button edit: the first free endpoint slot takes the cell, and
    /// once both are placed any other cell becomes a barrier.
    pub fn paint(&mut self, board: &mut Board, cell: Point) -> bool {
        if !board.contains(cell) {
            return false;
        }
        let is_start = self.start == Some(cell);
        let is_end = self.end == Some(cell);
        if self.start.is_none() && !is_end {
            self.start = Some(cell);
            board.set_state(cell, CellState::Start);
            log::debug!("start placed at {cell}");
        } else if self.end.is_none() && !is_start {
            self.end = Some(cell);
            board.set_state(cell, CellState::End);
            log::debug!("end placed at {cell}");
        } else if !is_start && !is_end {
            if board.state(cell) == Some(CellState::Barrier) {
                return false;
            }
            board.set_state(cell, CellState::Barrier);
        } else {
            return false;
        }
        true
    }

    /// Secondary-button edit: the cell goes back to Empty, freeing its
    /// endpoint slot if it held one.
    pub fn erase(&mut self, board: &mut Board, cell: Point) -> bool {
        let Some(state) = board.state(cell) else {
            return false;
        };
        if self.start == Some(cell) {
            self.start = None;
        } else if self.end == Some(cell) {
            self.end = None;
        }
        if let Some(c) = board.cell_mut(cell) {
            c.reset();
        }
        state != CellState::Empty
    }

    /// Empty the whole board and forget both endpoints.
    pub fn reset(&mut self, board: &mut Board) {
        board.reset();
        self.start = None;
        self.end = None;
        log::info!("board reset");
    }

    /// Re-tag the placed endpoints. A search run marks End as Open when it
    /// discovers it, and a cancelled run leaves that mark behind.
    pub fn restore_endpoints(&self, board: &mut Board) {
        if let Some(p) = self.start {
            board.set_state(p, CellState::Start);
        }
        if let Some(p) = self.end {
            board.set_state(p, CellState::End);
        }
    }

    /// Turn each Empty cell into a barrier with probability `density`.
    /// Endpoints and search marks are left alone. Returns the number of
    /// barriers added.
    pub fn scatter<R: Rng>(&self, board: &mut Board, density: f64, rng: &mut R) -> usize {
        let density = density.clamp(0.0, 1.0);
        let candidates: Vec<Point> = board
            .cells()
            .filter(|c| c.state() == CellState::Empty)
            .map(|c| c.pos())
            .collect();
        let mut added = 0;
        for p in candidates {
            if rng.random_bool(density) {
                board.set_state(p, CellState::Barrier);
                added += 1;
            }
        }
        log::info!("scattered {added} barriers (density {density})");
        added
    }
}
