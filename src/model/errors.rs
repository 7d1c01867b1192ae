//! Validation error types
//!
//! A `ValidationError` carries one `FieldError` per failing field so the
//! HTTP layer can surface per-field detail in the 422 response body.

use std::fmt;

use serde::Serialize;

/// A single failed validation rule, tied to the field that failed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Input validation failure.
///
/// Always contains at least one field error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Convenience constructor for a single failing field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Returns the names of the failing fields.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field_display() {
        let err = ValidationError::single("title", "must not be empty");
        assert_eq!(err.to_string(), "validation failed: title must not be empty");
    }

    #[test]
    fn test_multiple_fields_display() {
        let err = ValidationError::new(vec![
            FieldError::new("title", "must not be empty"),
            FieldError::new("year", "must be between 0 and 2100"),
        ]);
        let rendered = err.to_string();
        assert!(rendered.contains("title must not be empty"));
        assert!(rendered.contains("year must be between 0 and 2100"));
    }

    #[test]
    fn test_fields_accessor() {
        let err = ValidationError::new(vec![
            FieldError::new("title", "must not be empty"),
            FieldError::new("author", "must not be empty"),
        ]);
        assert_eq!(err.fields(), vec!["title", "author"]);
    }

    #[test]
    fn test_field_error_serializes() {
        let err = FieldError::new("year", "must be between 0 and 2100");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "year");
        assert_eq!(json["message"], "must be between 0 and 2100");
    }
}
