//! `pathviz.toml` loading.
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pathviz_core::Color;
use pathviz_search::{Algorithm, Board, LayoutError};
use serde::Deserialize;

/// Name of the configuration file looked up when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "pathviz.toml";

/// Largest board the terminal front-end accepts.
pub const MAX_GRID_SIZE: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scatter: ScatterConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    #[serde(default = "default_size")]
    pub size: usize,
    /// Terminal columns per board cell.
    #[serde(default = "default_cell_width")]
    pub cell_width: i32,
    /// ASCII board loaded at start-up instead of an empty one.
    #[serde(default)]
    pub layout: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Pause between animation frames. Input is polled during the pause.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScatterConfig {
    /// Probability that an Empty cell becomes a Barrier.
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteConfig {
    #[serde(default = "default_empty")]
    pub empty: Color,
    #[serde(default = "default_barrier")]
    pub barrier: Color,
    #[serde(default = "default_start")]
    pub start: Color,
    #[serde(default = "default_end")]
    pub end: Color,
    #[serde(default = "default_open")]
    pub open: Color,
    #[serde(default = "default_closed")]
    pub closed: Color,
    #[serde(default = "default_path")]
    pub path: Color,
    /// Foreground of the dots drawn on Empty cells.
    #[serde(default = "default_grid_line")]
    pub grid_line: Color,
    #[serde(default = "default_status_fg")]
    pub status_fg: Color,
    #[serde(default = "default_status_bg")]
    pub status_bg: Color,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log file; nothing is logged when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// An `EnvFilter` directive such as `"info"` or `"pathviz_search=debug"`.
    #[serde(default = "default_level")]
    pub level: String,
}

// Default values
fn default_size() -> usize { 20 }
fn default_cell_width() -> i32 { 2 }
fn default_step_delay_ms() -> u64 { 15 }
fn default_density() -> f64 { 0.25 }
fn default_empty() -> Color { Color::from_rgb(255, 255, 255) }
fn default_barrier() -> Color { Color::from_rgb(0, 0, 0) }
fn default_start() -> Color { Color::from_rgb(255, 165, 0) }
fn default_end() -> Color { Color::from_rgb(64, 224, 208) }
fn default_open() -> Color { Color::from_rgb(0, 255, 0) }
fn default_closed() -> Color { Color::from_rgb(255, 0, 0) }
fn default_path() -> Color { Color::from_rgb(128, 0, 128) }
fn default_grid_line() -> Color { Color::from_rgb(128, 128, 128) }
fn default_status_fg() -> Color { Color::from_rgb(230, 230, 230) }
fn default_status_bg() -> Color { Color::from_rgb(40, 42, 54) }
fn default_level() -> String { "info".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            cell_width: default_cell_width(),
            layout: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            seed: None,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            empty: default_empty(),
            barrier: default_barrier(),
            start: default_start(),
            end: default_end(),
            open: default_open(),
            closed: default_closed(),
            path: default_path(),
            grid_line: default_grid_line(),
            status_fg: default_status_fg(),
            status_bg: default_status_bg(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_level(),
        }
    }
}

impl Config {
    /// Load `path`, falling back to the defaults when the file does not
    /// exist. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.grid;
        if grid.size == 0 || grid.size > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid.size must be between 1 and {MAX_GRID_SIZE}, got {}",
                grid.size
            )));
        }
        if grid.cell_width < 1 {
            return Err(ConfigError::Invalid(format!(
                "grid.cell_width must be at least 1, got {}",
                grid.cell_width
            )));
        }
        let density = self.scatter.density;
        if !(0.0..=1.0).contains(&density) {
            return Err(ConfigError::Invalid(format!(
                "scatter.density must be within [0, 1], got {density}"
            )));
        }
        Ok(())
    }

    /// The board to start with: the `[grid] layout` file when set, otherwise
    /// an empty `size`×`size` board.
    pub fn initial_board(&self) -> Result<Board, ConfigError> {
        let Some(path) = &self.grid.layout else {
            return Ok(Board::new(self.grid.size));
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let board = Board::parse(&text).map_err(|source| ConfigError::Layout {
            path: path.clone(),
            source,
        })?;
        if board.size() > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "{}: board is {n}x{n}, the limit is {MAX_GRID_SIZE}",
                path.display(),
                n = board.size()
            )));
        }
        log::info!("loaded {n}x{n} board from {}", path.display(), n = board.size());
        Ok(board)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    Layout { path: PathBuf, source: LayoutError },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "config: {}: {source}", path.display()),
            Self::Parse(e) => write!(f, "config: {e}"),
            Self::Layout { path, source } => write!(f, "config: {}: {source}", path.display()),
            Self::Invalid(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Layout { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}
