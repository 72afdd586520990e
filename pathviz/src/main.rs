use std::path::PathBuf;
use std::time::Duration;

use pathviz_core::app::{App, AppConfig};
use pathviz_crossterm::CrosstermDriver;

use pathviz_lib::config::{Config, DEFAULT_CONFIG_PATH};
use pathviz_lib::{Visualizer, logging};

/// How long the idle loop waits for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&path)?;
    logging::init(&config.logging)?;
    log::info!("configuration from {}", path.display());

    let board = config.initial_board()?;
    let model = Visualizer::new(&config, board);
    let layout = model.layout();
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width: layout.width(),
        height: layout.height(),
        poll_interval: POLL_INTERVAL,
    });
    app.run()?;
    Ok(())
}
