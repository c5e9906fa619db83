//! `floorflow` binary entry point.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use floorflow_cli::cli::Cli;
use floorflow_cli::commands;
use floorflow_cli::config::FloorflowConfig;

const DEFAULT_FILTER: &str = "warn,floorflow=info";

fn init_tracing(verbose: bool, configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(configured.unwrap_or(DEFAULT_FILTER))
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = FloorflowConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    init_tracing(cli.verbose, config.log_level.as_deref());

    match commands::run(cli, config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
