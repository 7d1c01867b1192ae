//! Book entity and draft types

use serde::{Deserialize, Serialize};

use super::errors::{FieldError, ValidationError};

/// Lowest accepted publication year.
pub const YEAR_MIN: i32 = 0;
/// Highest accepted publication year.
pub const YEAR_MAX: i32 = 2100;

/// A catalog record.
///
/// The id is assigned by the store on creation and never changes. Title and
/// author are guaranteed non-empty for any `Book` that passed through
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

/// Incoming book data for create and update requests.
///
/// Carries everything a `Book` has except the id, which the store owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Validates the draft, collecting every failing field.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` with one entry per failing field if the
    /// title or author is empty, or the year falls outside
    /// [`YEAR_MIN`]..=[`YEAR_MAX`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.title.is_empty() {
            errors.push(FieldError::new("title", "must not be empty"));
        }

        if self.author.is_empty() {
            errors.push(FieldError::new("author", "must not be empty"));
        }

        if let Some(year) = self.year {
            if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
                errors.push(FieldError::new(
                    "year",
                    format!("must be between {} and {}", YEAR_MIN, YEAR_MAX),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }

    /// Builds the Book this draft describes, under the given id.
    pub fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let draft = BookDraft::new("War and Peace", "Leo Tolstoy", Some(1869));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_year_is_optional() {
        let draft = BookDraft::new("The Trial", "Franz Kafka", None);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let draft = BookDraft::new("", "Leo Tolstoy", None);
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);
    }

    #[test]
    fn test_empty_author_rejected() {
        let draft = BookDraft::new("War and Peace", "", None);
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["author"]);
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let too_early = BookDraft::new("Epic of Gilgamesh", "Unknown", Some(-1800));
        assert_eq!(too_early.validate().unwrap_err().fields(), vec!["year"]);

        let too_late = BookDraft::new("Future Book", "Nobody", Some(2101));
        assert_eq!(too_late.validate().unwrap_err().fields(), vec!["year"]);
    }

    #[test]
    fn test_year_bounds_inclusive() {
        assert!(BookDraft::new("a", "b", Some(YEAR_MIN)).validate().is_ok());
        assert!(BookDraft::new("a", "b", Some(YEAR_MAX)).validate().is_ok());
    }

    #[test]
    fn test_all_failures_collected() {
        let draft = BookDraft::new("", "", Some(9999));
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["title", "author", "year"]);
    }

    #[test]
    fn test_into_book_keeps_fields() {
        let draft = BookDraft::new("Dune", "Frank Herbert", Some(1965));
        let book = draft.into_book(7);
        assert_eq!(book.id, 7);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year, Some(1965));
    }

    #[test]
    fn test_draft_deserializes_without_year() {
        let draft: BookDraft =
            serde_json::from_str(r#"{"title": "Dune", "author": "Frank Herbert"}"#).unwrap();
        assert_eq!(draft.year, None);
    }
}
