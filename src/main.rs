//! VideoSlimmer binary entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use videoslimmer::cli::Cli;
use videoslimmer::logging::{self, LogLevel};
use videoslimmer::{pipeline, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = LogLevel::parse_or_default(&cli.loglevel);
    let logs_dir = cli.logpath.clone().unwrap_or_else(|| PathBuf::from("logs"));
    let _guard = logging::init(level, &logs_dir)?;

    // Fatal on any configuration problem; no file has been touched yet.
    let config = Config::from_cli(&cli)?;

    pipeline::run(&config);

    Ok(())
}
