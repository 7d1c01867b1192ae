//! Observability for bookdb
//!
//! Structured JSON logging: one line per event, written synchronously with
//! deterministic key ordering so log output is stable across runs. No async,
//! no background threads.

mod logger;

pub use logger::{Logger, Severity};
