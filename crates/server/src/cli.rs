//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};

/// Vet Relay - veterinary emergency notification relay
#[derive(Parser, Debug)]
#[command(
    name = "vet-relay",
    author,
    version,
    about = "Veterinary emergency notification relay",
    long_about = "An HTTP relay for veterinary emergency reports.\n\n\
                  Accepts emergency submissions, forwards them to the configured \n\
                  notification sinks (Telegram chat, Make webhook), and reports \n\
                  an aggregated delivery status."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "VET_RELAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "VET_RELAY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP relay server
    Serve(ServeArgs),

    /// Check the environment configuration without starting the server
    Check(CheckArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Override the listen port from the environment configuration
    #[arg(long)]
    pub port: Option<u16>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "VET_RELAY_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output the check result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
