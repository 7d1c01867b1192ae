//! HTTP server
//!
//! Owns the combined router (health + book routes) and the CORS layer, and
//! serves it on the configured address.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;
use crate::store::BookStore;

use super::config::HttpServerConfig;
use super::routes::{book_routes, health_routes, BooksState};

/// HTTP server for the book collection API.
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new server over an opened store.
    pub fn new(store: BookStore, config: HttpServerConfig) -> Self {
        let router = Self::build_router(store, &config);
        Self { config, router }
    }

    fn build_router(store: BookStore, config: &HttpServerConfig) -> Router {
        let state = Arc::new(BooksState::new(store));

        // Permissive CORS when no origins are configured.
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(book_routes(state))
            .layer(cors)
    }

    /// The socket address the server will bind.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Returns the router (for testing).
    pub fn router(self) -> Router {
        self.router
    }

    /// Binds the listener and serves until the process exits.
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid socket address: {}", e)))?;

        Logger::info("SERVER_STARTED", &[("addr", &addr.to_string())]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
