use std::collections::{HashSet, VecDeque};

use pathviz_core::{Context, Point};

use crate::board::Board;
use crate::search::{Predecessors, SearchError, SearchOutcome, check_endpoints, finish};
use crate::state::CellState;

/// Breadth-first search from `start` to `end` over the cached neighbour
/// lists, animating as it goes.
///
/// Each round dequeues one cell, opens its unvisited neighbours (in
/// up, down, left, right order), calls `on_step`, and then closes the cell
/// unless it is `start`. Reaching `end` reconstructs the path, calling
/// `on_step` once per Path cell. `ctx` is checked before every round and
/// every reconstruction step; a cancelled run leaves its marks in place.
pub fn breadth_first_search<F>(
    board: &mut Board,
    start: Point,
    end: Point,
    ctx: &Context,
    mut on_step: F,
) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(&Board),
{
    check_endpoints(board, start, end)?;

    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut came_from = Predecessors::new();
    let mut expanded = Vec::new();
    let mut nbuf: Vec<Point> = Vec::with_capacity(4);

    loop {
        if ctx.is_done() {
            log::debug!("bfs cancelled after {} expansions", expanded.len());
            return Ok(SearchOutcome::cancelled(came_from, expanded));
        }
        let Some(current) = queue.pop_front() else {
            break;
        };
        expanded.push(current);

        if current == end {
            return Ok(finish(board, start, end, came_from, expanded, ctx, on_step));
        }

        nbuf.clear();
        nbuf.extend_from_slice(board.neighbors(current));
        for &n in nbuf.iter() {
            if visited.insert(n) {
                queue.push_back(n);
                came_from.insert(n, current);
                board.set_state(n, CellState::Open);
            }
        }

        on_step(board);

        if current != start {
            board.set_state(current, CellState::Closed);
        }
    }

    log::debug!("bfs exhausted the frontier without reaching {end}");
    Ok(SearchOutcome::exhausted(came_from, expanded))
}
