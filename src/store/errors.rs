//! Store error types

use std::io;

use thiserror::Error;

use crate::model::ValidationError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the book store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before anything was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No book exists under the given id.
    #[error("book not found: {0}")]
    NotFound(u64),

    /// Appending or syncing the log failed.
    #[error("storage write failed: {context}: {source}")]
    WriteFailed {
        context: String,
        source: io::Error,
    },

    /// Reading the log failed.
    #[error("storage read failed: {context}: {source}")]
    ReadFailed {
        context: String,
        source: io::Error,
    },

    /// A record failed checksum or framing validation during replay.
    /// The store refuses to open over a corrupted log.
    #[error("storage corruption detected: {0}")]
    Corruption(String),
}

impl StoreError {
    pub fn write_failed(context: impl Into<String>, source: io::Error) -> Self {
        Self::WriteFailed {
            context: context.into(),
            source,
        }
    }

    pub fn read_failed(context: impl Into<String>, source: io::Error) -> Self {
        Self::ReadFailed {
            context: context.into(),
            source,
        }
    }
}
