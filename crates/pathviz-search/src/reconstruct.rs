use pathviz_core::{Context, Point};

use crate::board::Board;
use crate::search::Predecessors;
use crate::state::CellState;

/// Walk the predecessor map back from `end`, marking each cell on the way
/// as Path and calling `on_step` after every mark.
///
/// The walk starts at `end`'s predecessor and continues while the current
/// cell has an entry of its own, so neither endpoint is marked. Returns the
/// number of cells marked, or `None` if `ctx` was cancelled part-way.
pub fn reconstruct_path<F>(
    board: &mut Board,
    came_from: &Predecessors,
    end: Point,
    ctx: &Context,
    mut on_step: F,
) -> Option<usize>
where
    F: FnMut(&Board),
{
    let mut marked = 0;
    let mut current = came_from.get(end);
    while let Some(p) = current {
        if !came_from.contains(p) {
            break;
        }
        if ctx.is_done() {
            return None;
        }
        board.set_state(p, CellState::Path);
        marked += 1;
        on_step(board);
        current = came_from.get(p);
    }
    Some(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A straight chain (0,0) <- (1,0) <- (2,0) <- (3,0).
    fn chain() -> Predecessors {
        let mut came_from = Predecessors::new();
        for x in 1..4 {
            came_from.insert(Point::new(x, 0), Point::new(x - 1, 0));
        }
        came_from
    }

    #[test]
    fn marks_interior_cells_once_each() {
        let mut board = Board::new(4);
        let mut steps = Vec::new();
        let marked = reconstruct_path(&mut board, &chain(), Point::new(3, 0), &Context::new(), |b| {
            steps.push(b.count(CellState::Path))
        });
        assert_eq!(marked, Some(2));
        assert_eq!(steps, vec![1, 2]);
        assert_eq!(board.state(Point::new(0, 0)), Some(CellState::Empty));
        assert_eq!(board.state(Point::new(1, 0)), Some(CellState::Path));
        assert_eq!(board.state(Point::new(2, 0)), Some(CellState::Path));
        assert_eq!(board.state(Point::new(3, 0)), Some(CellState::Empty));
    }

    #[test]
    fn end_without_predecessor_marks_nothing() {
        let mut board = Board::new(2);
        let mut calls = 0;
        let marked = reconstruct_path(&mut board, &Predecessors::new(), Point::ZERO, &Context::new(), |_| {
            calls += 1
        });
        assert_eq!(marked, Some(0));
        assert_eq!(calls, 0);
    }

    #[test]
    fn cancellation_stops_the_walk() {
        let mut board = Board::new(4);
        let ctx = Context::new();
        let marked = reconstruct_path(&mut board, &chain(), Point::new(3, 0), &ctx, |_| ctx.cancel());
        assert_eq!(marked, None);
        assert_eq!(board.count(CellState::Path), 1);
    }
}
