//! Framemark CLI
//!
//! Annotates video frames and exports the labels as CSV.
//!
//! # Usage
//!
//! ```bash
//! framemark annotate --project game.json --start 30 --end 90 --text serve
//! framemark export --project game.json --output game.csv --total-frames 900
//! framemark export-clip --project game.json --video game.mp4 --start 31 --end 90
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use framemark::adapters::init_logging;
use framemark::app::container::DefaultAppContainer;
use framemark::cli::{commands, Cli};
use framemark::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the Framemark CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings decide the log level, so logging starts after they resolve
    let mut session = initialize_configuration_hierarchy(&cli)?;
    let settings = session.effective().clone();
    init_logging(&settings.log_level, settings.json_logs);
    session.log_source();
    info!(config = %session.config_path().display(), "Starting Framemark");

    let container = DefaultAppContainer::new(&settings);
    let result = commands::run(cli.command, &container, &mut session).await;

    if let Err(e) = session.save() {
        warn!("Failed to save settings: {}", e);
    }

    result
}
