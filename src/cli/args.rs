//! CLI argument definitions using clap
//!
//! Commands:
//! - bookdb init --config <path>
//! - bookdb serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bookdb - a small, durable book-collection service
#[derive(Parser, Debug)]
#[command(name = "bookdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new bookdb data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./bookdb.json")]
        config: PathBuf,
    },

    /// Start the bookdb HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./bookdb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
