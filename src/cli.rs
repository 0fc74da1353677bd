use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agroadvisor",
    version,
    about = "Agricultural advisory service: yield, fertilizer, disease and weather guidance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Override the configured bind address, e.g. 127.0.0.1:8080
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Interactively write a config file
    Init,
    /// Validate config and test the weather connection
    Check,
    /// Estimate yield from a JSON request file
    Yield {
        /// Path to a yield request in the same shape as the HTTP body
        input: PathBuf,
    },
    /// Build a fertilizer plan from a JSON request file
    Fertilizer {
        /// Path to a fertilizer request in the same shape as the HTTP body
        input: PathBuf,
    },
}
