//! Book entity and input validation
//!
//! The model layer owns the shape of a catalog record and the rules an
//! incoming draft must satisfy before the store will persist it:
//!
//! - title and author must not be empty
//! - year, when present, must lie in [0, 2100]
//!
//! Validation is deterministic and reports every failing field, not just
//! the first one.

mod book;
mod errors;

pub use book::{Book, BookDraft, YEAR_MAX, YEAR_MIN};
pub use errors::{FieldError, ValidationError};
