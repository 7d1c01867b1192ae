//! CLI error types

use std::io;

use thiserror::Error;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by CLI commands. All of them are fatal to the process.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("data directory already initialized")]
    AlreadyInitialized,

    #[error("data directory not initialized; run 'bookdb init' first")]
    NotInitialized,

    #[error("boot failed: {0}")]
    Boot(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::Boot(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_mentions_init() {
        assert!(CliError::NotInitialized.to_string().contains("bookdb init"));
    }

    #[test]
    fn test_io_error_conversion() {
        let err: CliError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(err.to_string().contains("missing"));
    }
}
