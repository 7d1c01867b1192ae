//! CLI module for bookdb
//!
//! Provides the command-line interface:
//! - init: create the data directory layout
//! - serve: open the store and run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run_command, serve, Config};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
