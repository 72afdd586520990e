//! File logging.
//!
//! The terminal is in raw mode on the alternate screen while pathviz runs,
//! so log output goes to a file or nowhere.

use std::error::Error;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install a global subscriber writing to `config.file`, which also picks
/// up `log` records from the library crates. Does nothing when no file is
/// configured.
pub fn init(config: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_new(&config.level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    log::info!("pathviz {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}
