//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};

/// Media generation gateway - image and video generation behind HTTP and
/// pipe transports.
#[derive(Parser, Debug)]
#[command(name = "mediagen", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Which transport to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Transport selection.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Host address to bind the server to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind the server to.
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Read JSON records from stdin and write payload lines to stdout.
    Pipe,
}
