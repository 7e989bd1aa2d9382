//! AQI Forecast - Main Entry Point

use aqi_forecast::{init_logging, load_config, Command};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "aqi-forecast",
    version,
    about = "Next-day Air Quality Index forecasting"
)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.log_level)?;

    info!("=== AQI Forecast v{} ===", env!("CARGO_PKG_VERSION"));
    aqi_forecast::run(cli.command, &config)
}
