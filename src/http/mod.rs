//! HTTP layer for bookdb
//!
//! Axum router, request handlers, and the boundary error mapping:
//! validation failures become 422 with per-field detail, missing ids become
//! 404, and everything else propagates as 500.

mod config;
mod errors;
mod routes;
mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use routes::{book_routes, health_routes, BooksState};
pub use server::HttpServer;
