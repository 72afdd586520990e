//! Shared search types: [`Algorithm`], [`SearchOutcome`], [`Predecessors`],
//! [`SearchError`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pathviz_core::{Context, Point};

use crate::board::Board;
use crate::reconstruct::reconstruct_path;
use crate::state::CellState;
use crate::{bfs, dijkstra};

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// For every cell a search reached, the cell it was reached from.
///
/// The start cell never has an entry, which is what stops a backward walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Predecessors(HashMap<Point, Point>);

impl Predecessors {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, cell: Point, from: Point) {
        self.0.insert(cell, from);
    }

    #[inline]
    pub fn get(&self, cell: Point) -> Option<Point> {
        self.0.get(&cell).copied()
    }

    #[inline]
    pub fn contains(&self, cell: Point) -> bool {
        self.0.contains_key(&cell)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The cells strictly between the start and `end`, walking back from
    /// `end`. These are exactly the cells [`reconstruct_path`] marks.
    pub fn interior(&self, end: Point) -> Vec<Point> {
        let mut cells = Vec::new();
        let mut current = self.get(end);
        while let Some(p) = current {
            if !self.contains(p) {
                break;
            }
            cells.push(p);
            current = self.get(p);
        }
        cells
    }
}

// ---------------------------------------------------------------------------
// SearchOutcome
// ---------------------------------------------------------------------------

/// Result of one search run.
#[derive(Clone, Debug, Default)]
pub struct SearchOutcome {
    /// The end cell was reached and the path fully marked.
    pub found: bool,
    /// The run stopped because its [`Context`] was cancelled. Never set
    /// together with `found`.
    pub cancelled: bool,
    pub came_from: Predecessors,
    /// Cells in the order they were taken off the frontier.
    pub expanded: Vec<Point>,
    /// Number of cells marked Path.
    pub path_len: usize,
}

impl SearchOutcome {
    pub(crate) fn exhausted(came_from: Predecessors, expanded: Vec<Point>) -> Self {
        Self {
            came_from,
            expanded,
            ..Self::default()
        }
    }

    pub(crate) fn cancelled(came_from: Predecessors, expanded: Vec<Point>) -> Self {
        Self {
            cancelled: true,
            came_from,
            expanded,
            ..Self::default()
        }
    }
}

/// Reconstruct the path once `end` is dequeued, then restore the endpoint
/// tags the search overwrote.
pub(crate) fn finish<F>(
    board: &mut Board,
    start: Point,
    end: Point,
    came_from: Predecessors,
    expanded: Vec<Point>,
    ctx: &Context,
    on_step: F,
) -> SearchOutcome
where
    F: FnMut(&Board),
{
    let Some(path_len) = reconstruct_path(board, &came_from, end, ctx, on_step) else {
        log::debug!("path reconstruction cancelled");
        return SearchOutcome::cancelled(came_from, expanded);
    };
    board.set_state(start, CellState::Start);
    board.set_state(end, CellState::End);
    SearchOutcome {
        found: true,
        cancelled: false,
        came_from,
        expanded,
        path_len,
    }
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// A search was invoked without valid endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    MissingStart,
    MissingEnd,
    OutOfBounds(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "search: no start cell"),
            Self::MissingEnd => write!(f, "search: no end cell"),
            Self::OutOfBounds(p) => write!(f, "search: endpoint {p} is off the board"),
        }
    }
}

impl std::error::Error for SearchError {}

pub(crate) fn check_endpoints(board: &Board, start: Point, end: Point) -> Result<(), SearchError> {
    for p in [start, end] {
        if !board.contains(p) {
            return Err(SearchError::OutOfBounds(p));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The search algorithms the visualizer can animate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Algorithm {
    Bfs,
    #[default]
    Dijkstra,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dijkstra => "Dijkstra",
        }
    }

    /// The other algorithm.
    pub fn toggle(self) -> Self {
        match self {
            Self::Bfs => Self::Dijkstra,
            Self::Dijkstra => Self::Bfs,
        }
    }

    /// Search from `start` to `end` over the board's cached neighbour lists.
    pub fn search<F>(
        self,
        board: &mut Board,
        start: Point,
        end: Point,
        ctx: &Context,
        on_step: F,
    ) -> Result<SearchOutcome, SearchError>
    where
        F: FnMut(&Board),
    {
        match self {
            Self::Bfs => bfs::breadth_first_search(board, start, end, ctx, on_step),
            Self::Dijkstra => dijkstra::dijkstra(board, start, end, ctx, on_step),
        }
    }

    /// Prepare the board and search between its Start and End cells.
    ///
    /// Marks from a previous run are cleared and neighbour lists rebuilt
    /// before the search starts.
    pub fn run<F>(
        self,
        board: &mut Board,
        ctx: &Context,
        on_step: F,
    ) -> Result<SearchOutcome, SearchError>
    where
        F: FnMut(&Board),
    {
        let start = board.find(CellState::Start).ok_or(SearchError::MissingStart)?;
        let end = board.find(CellState::End).ok_or(SearchError::MissingEnd)?;
        board.clear_search();
        board.update_neighbors();
        log::info!("{}: searching {start} -> {end} on {n}x{n}", self.name(), n = board.size());
        let outcome = self.search(board, start, end, ctx, on_step)?;
        log::info!(
            "{}: found={} cancelled={} expanded={} path={}",
            self.name(),
            outcome.found,
            outcome.cancelled,
            outcome.expanded.len(),
            outcome.path_len
        );
        Ok(outcome)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dijkstra" => Ok(Self::Dijkstra),
            other => Err(format!("unknown algorithm \u{201c}{other}\u{201d}")),
        }
    }
}
