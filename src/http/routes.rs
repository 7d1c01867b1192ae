//! Book HTTP routes
//!
//! One handler per store operation plus the health check. Each handler
//! acquires the store session at request start; the guard is released on
//! every exit path when it falls out of scope.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::model::{Book, BookDraft, FieldError, ValidationError, YEAR_MAX, YEAR_MIN};
use crate::store::{BookStore, SearchQuery};

use super::errors::{ApiError, ApiResult};

/// Highest accepted page size.
pub const LIMIT_MAX: i64 = 100;

// ==================
// Shared State
// ==================

/// Shared server state holding the store behind a mutex.
pub struct BooksState {
    store: Mutex<BookStore>,
}

impl BooksState {
    pub fn new(store: BookStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Acquires the per-request store session.
    fn session(&self) -> ApiResult<MutexGuard<'_, BookStore>> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    LIMIT_MAX
}

impl ListQuery {
    /// Validates the pagination window, returning (skip, limit).
    fn validate(&self) -> ApiResult<(usize, usize)> {
        let mut errors = Vec::new();

        if self.skip < 0 {
            errors.push(FieldError::new("skip", "must be greater than or equal to 0"));
        }
        if !(1..=LIMIT_MAX).contains(&self.limit) {
            errors.push(FieldError::new(
                "limit",
                format!("must be between 1 and {}", LIMIT_MAX),
            ));
        }

        if errors.is_empty() {
            Ok((self.skip as usize, self.limit as usize))
        } else {
            Err(ValidationError::new(errors).into())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl SearchParams {
    /// Validates the year bound and normalizes empty strings to "absent".
    fn into_query(self) -> ApiResult<SearchQuery> {
        if let Some(year) = self.year {
            if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
                return Err(ValidationError::single(
                    "year",
                    format!("must be between {} and {}", YEAR_MIN, YEAR_MAX),
                )
                .into());
            }
        }

        Ok(SearchQuery {
            title: self.title.filter(|t| !t.is_empty()),
            author: self.author.filter(|a| !a.is_empty()),
            year: self.year,
        })
    }
}

// ==================
// Routers
// ==================

/// Health check at the root path.
pub fn health_routes() -> Router {
    Router::new().route("/", get(health_handler))
}

/// CRUD and search routes over the book collection.
pub fn book_routes(state: Arc<BooksState>) -> Router {
    Router::new()
        .route("/books/", get(list_books_handler).post(create_book_handler))
        .route("/books/search/", get(search_books_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Welcome to the book collection API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn create_book_handler(
    State(state): State<Arc<BooksState>>,
    Json(draft): Json<BookDraft>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let mut session = state.session()?;
    let book = session.create(&draft)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn list_books_handler(
    State(state): State<Arc<BooksState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Book>>> {
    let (skip, limit) = query.validate()?;
    let session = state.session()?;
    Ok(Json(session.list(skip, limit)))
}

async fn get_book_handler(
    State(state): State<Arc<BooksState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Book>> {
    let session = state.session()?;
    let book = session.get(id)?;
    Ok(Json(book))
}

async fn update_book_handler(
    State(state): State<Arc<BooksState>>,
    Path(id): Path<u64>,
    Json(draft): Json<BookDraft>,
) -> ApiResult<Json<Book>> {
    let mut session = state.session()?;
    let book = session.update(id, &draft)?;
    Ok(Json(book))
}

async fn delete_book_handler(
    State(state): State<Arc<BooksState>>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    let mut session = state.session()?;
    session.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_books_handler(
    State(state): State<Arc<BooksState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Book>>> {
    let query = params.into_query()?;
    let session = state.session()?;
    Ok(Json(session.search(&query)))
}
