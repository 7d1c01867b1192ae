//! Durable book store
//!
//! The store holds the canonical persistent state of the collection: an
//! append-only record log with no in-place updates, replayed into an
//! in-memory index on open.
//!
//! # Design Principles
//!
//! - Append-only (updates and deletes append new records)
//! - Checksum-verified on every replay
//! - Latest record wins for the same book id
//! - Every mutation is fsynced before it is acknowledged
//! - Any corruption found during replay aborts the open
//!
//! Ids are allocated monotonically and never reused, so id order equals
//! insertion order.

mod checksum;
mod errors;
mod log;
mod record;
mod store;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{StoreError, StoreResult};
pub use log::BookLog;
pub use record::BookRecord;
pub use store::{BookStore, SearchQuery};
