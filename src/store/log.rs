//! Append-only record log
//!
//! Maintains `<data_dir>/data/books.log`. Appends are fsynced before they
//! are acknowledged; replay reads the file front to back and fails on the
//! first corrupt or truncated record.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::BookRecord;

/// The file name of the record log inside the data directory.
pub const LOG_FILE: &str = "books.log";

/// Append-only writer over the book record log.
pub struct BookLog {
    path: PathBuf,
    file: File,
}

impl BookLog {
    /// Opens or creates the record log under `<data_dir>/data/`.
    ///
    /// Parent directories are created if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the directory or file cannot be
    /// created or opened.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let dir = data_dir.join("data");
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::write_failed(
                format!("failed to create data directory: {}", dir.display()),
                e,
            )
        })?;

        let path = dir.join(LOG_FILE);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::write_failed(
                    format!("failed to open record log: {}", path.display()),
                    e,
                )
            })?;

        Ok(Self { path, file })
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record and fsyncs.
    ///
    /// The operation must not be acknowledged unless both the write and the
    /// fsync complete.
    pub fn append(&mut self, record: &BookRecord) -> StoreResult<()> {
        let bytes = record.serialize();

        self.file.write_all(&bytes).map_err(|e| {
            StoreError::write_failed(format!("failed to append record for book {}", record.id), e)
        })?;

        self.file.sync_all().map_err(|e| {
            StoreError::write_failed(format!("fsync failed after record for book {}", record.id), e)
        })?;

        Ok(())
    }

    /// Reads every record in the log, in write order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corruption` on the first record that fails
    /// checksum or framing validation. A corrupt log never replays
    /// partially.
    pub fn replay(&self) -> StoreResult<Vec<BookRecord>> {
        let data = fs::read(&self.path).map_err(|e| {
            StoreError::read_failed(format!("failed to read record log: {}", self.path.display()), e)
        })?;

        let mut records = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let (record, consumed) = BookRecord::deserialize(&data[offset..])
                .map_err(|e| StoreError::Corruption(format!("record at offset {}: {}", offset, e)))?;
            records.push(record);
            offset += consumed;
        }

        Ok(records)
    }
}
