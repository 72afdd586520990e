use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use pathviz_core::{Context, Point};

use crate::board::Board;
use crate::search::{Predecessors, SearchError, SearchOutcome, check_endpoints, finish};
use crate::state::CellState;

/// Distance of a cell the search has not reached.
pub const UNREACHABLE: u32 = u32::MAX;

/// Frontier entry, ordered so `BinaryHeap` (a max-heap) pops the smallest
/// distance first and, among equal distances, the earliest push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueueEntry {
    dist: u32,
    seq: u64,
    pos: Point,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm from `start` to `end` with unit edge weights,
/// animating as it goes.
///
/// Follows the same step protocol as
/// [`breadth_first_search`](crate::breadth_first_search): one `on_step` per
/// popped cell after its neighbours are opened, then the cell is closed
/// unless it is `start`; one `on_step` per Path cell on success. With unit
/// weights the paths have BFS length, but the frontier is a priority queue.
pub fn dijkstra<F>(
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

    let mut dist = vec![UNREACHABLE; board.len()];
    if let Some(si) = board.index(start) {
        dist[si] = 0;
    }
    let mut seq = 0u64;
    let mut open = BinaryHeap::from([QueueEntry {
        dist: 0,
        seq,
        pos: start,
    }]);
    let mut visited = HashSet::from([start]);
    let mut came_from = Predecessors::new();
    let mut expanded = Vec::new();
    let mut nbuf: Vec<Point> = Vec::with_capacity(4);

    loop {
        if ctx.is_done() {
            log::debug!("dijkstra cancelled after {} expansions", expanded.len());
            return Ok(SearchOutcome::cancelled(came_from, expanded));
        }
        let Some(QueueEntry {
            dist: current_dist,
            pos: current,
            ..
        }) = open.pop()
        else {
            break;
        };
        expanded.push(current);

        if current == end {
            return Ok(finish(board, start, end, came_from, expanded, ctx, on_step));
        }

        nbuf.clear();
        nbuf.extend_from_slice(board.neighbors(current));
        for &n in nbuf.iter() {
            if visited.contains(&n) {
                continue;
            }
            let Some(ni) = board.index(n) else {
                continue;
            };
            let tentative = current_dist + 1;
            if tentative < dist[ni] {
                dist[ni] = tentative;
                seq += 1;
                open.push(QueueEntry {
                    dist: tentative,
                    seq,
                    pos: n,
                });
                came_from.insert(n, current);
                board.set_state(n, CellState::Open);
                visited.insert(n);
            }
        }

        on_step(board);

        if current != start {
            board.set_state(current, CellState::Closed);
        }
    }

    log::debug!("dijkstra exhausted the frontier without reaching {end}");
    Ok(SearchOutcome::exhausted(came_from, expanded))
}
