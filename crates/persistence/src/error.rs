//! Error types for the persistence layer.
//!
//! Errors are grouped by category: record lookups, input validation and
//! backend failures. The REST layer maps each category onto an HTTP status
//! and never forwards backend detail to clients.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::RetentionKind;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record lookup errors
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to individual records.
#[derive(Error, Debug)]
pub enum RecordError {
    /// No record matches the natural key.
    #[error("{kind} record not found: {key}")]
    NotFound { kind: RetentionKind, key: String },

    /// A user with the same username or RIF already exists.
    #[error("user already exists: {username}")]
    UserExists { username: String },
}

/// Errors raised while parsing listing or export input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A parameter could not be parsed.
    #[error("invalid {parameter} parameter: {value:?}")]
    InvalidParameter { parameter: String, value: String },

    /// A parameter parsed but is out of range.
    #[error("{parameter} must be at least {min}")]
    OutOfRange { parameter: String, min: u32 },

    /// A parameter is above the largest accepted value.
    #[error("{parameter} must be at most {max}")]
    TooLarge { parameter: String, max: u32 },

    /// A required parameter is missing or empty.
    #[error("missing required parameter: {parameter}")]
    MissingParameter { parameter: String },
}

impl ValidationError {
    /// Creates an [`ValidationError::InvalidParameter`].
    pub fn invalid(parameter: &str, value: &str) -> Self {
        ValidationError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a [`ValidationError::MissingParameter`].
    pub fn missing(parameter: &str) -> Self {
        ValidationError::MissingParameter {
            parameter: parameter.to_string(),
        }
    }
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema creation error.
    #[error("schema initialization failed: {message}")]
    SchemaError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::from(RecordError::NotFound {
            kind: RetentionKind::Islr,
            key: "J-1/100/200".to_string(),
        });
        assert_eq!(err.to_string(), "ISLR record not found: J-1/100/200");
    }

    #[test]
    fn test_validation_constructors() {
        assert_eq!(
            ValidationError::invalid("page", "abc").to_string(),
            "invalid page parameter: \"abc\""
        );
        assert_eq!(
            ValidationError::missing("islr_rif").to_string(),
            "missing required parameter: islr_rif"
        );
    }

    #[test]
    fn test_backend_error_is_transparent() {
        let err = StorageError::from(BackendError::QueryError {
            message: "no such table: dp_islr".to_string(),
        });
        assert!(err.to_string().contains("no such table"));
    }
}
