//! pathviz: an interactive terminal visualizer for BFS and Dijkstra.
//!
//! Click to place a start, an end and walls, then watch the selected search
//! flood the board one expansion per frame.

pub mod config;
pub mod editor;
pub mod layout;
pub mod logging;
pub mod model;
pub mod palette;

pub use config::{Config, ConfigError};
pub use model::Visualizer;
