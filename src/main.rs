//! bookdb CLI entry point
//!
//! Minimal entrypoint: parse arguments, dispatch to the CLI module, print
//! errors to stderr, and exit non-zero on failure. Configuration loading,
//! store recovery, and server startup all live behind `cli::run`.

use bookdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
