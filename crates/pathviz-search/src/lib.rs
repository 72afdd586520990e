//! Step-by-step grid search for the pathviz visualizer.
//!
//! A [`Board`] is a square grid of [`Cell`]s, each tagged with a
//! [`CellState`]. The searches walk the board's cached 4-way neighbour lists
//! and mark cells as they go, calling back after every expansion so the
//! caller can render each frame:
//!
//! - **BFS** ([`breadth_first_search`]): FIFO frontier.
//! - **Dijkstra** ([`dijkstra`]): priority frontier with unit edge weights.
//!
//! On success the path is walked back through the [`Predecessors`] map by
//! [`reconstruct_path`], again one callback per cell. Every loop checks a
//! [`Context`](pathviz_core::Context) so a run can be abandoned mid-way.
//!
//! [`Algorithm::run`] wraps the whole protocol: find the endpoints, clear
//! old marks, rebuild neighbour lists, search.

mod bfs;
mod board;
mod dijkstra;
mod layout;
mod reconstruct;
mod search;
mod state;

pub use bfs::breadth_first_search;
pub use board::{Board, Cell};
pub use dijkstra::{UNREACHABLE, dijkstra};
pub use layout::LayoutError;
pub use reconstruct::reconstruct_path;
pub use search::{Algorithm, Predecessors, SearchError, SearchOutcome};
pub use state::CellState;
