//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `delegation_probe` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status
//!
//! Result lines go to stdout; everything else goes to stderr.

use anyhow::{Context, Result};
use std::process;
use clap::Parser;

use delegation_probe::initialization::init_logger_with;
use delegation_probe::{run, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Per-domain failures are already logged; only fatal errors change the exit status
    match run(config).await {
        Ok(_report) => Ok(()),
        Err(e) => {
            eprintln!("delegation_probe error: {:#}", e);
            process::exit(1);
        }
    }
}
