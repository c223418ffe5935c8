//! Mediagen - media generation gateway.

mod adapters;
mod cli;
mod config;
mod encode;
mod error;
mod gateway;
mod ports;
mod storage;
mod style;
mod transport;

use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::gateway::Gateway;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mediagen=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), error::GenError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(error::GenError::Config)?;

    // Backends are constructed once here and injected; nothing global.
    let gateway = Arc::new(Gateway::from_config(&config)?);

    match cli.command {
        Command::Serve { host, port } => transport::http::serve(gateway, &host, port).await,
        Command::Pipe => transport::line::run(&gateway).await,
    }
}
