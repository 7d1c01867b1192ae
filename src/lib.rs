//! bookdb - a small, durable book-collection service
//!
//! A CRUD REST API over a single entity type (Book), backed by an
//! append-only record log replayed into memory on open.

pub mod cli;
pub mod http;
pub mod model;
pub mod observability;
pub mod store;
