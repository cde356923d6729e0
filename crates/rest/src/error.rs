//! Error types for the withholding API.
//!
//! Every error renders as `{"message": "..."}` with the status below, except
//! export lookups that miss, which answer with a plain-text body.
//!
//! | Error | HTTP Status | Body |
//! |-------|-------------|------|
//! | Unauthorized | 401 | `{"message": "Unauthorized"}` |
//! | InvalidCredentials | 401 | `{"message": "Invalid credentials"}` |
//! | BadRequest | 400 | `{"message": ...}` |
//! | NotFound | 404 | plain text |
//! | Conflict | 409 | `{"message": ...}` |
//! | InternalError | 500 | `{"message": "Internal server error"}` |
//!
//! Storage failures are logged with their full detail and then reduced to
//! the generic 500 body.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use retenciones_persistence::error::{RecordError, StorageError, ValidationError};
use retenciones_persistence::types::RetentionKind;
use serde_json::json;
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// No session cookie (HTTP 401).
    Unauthorized,

    /// Login with an unknown user or a wrong password (HTTP 401).
    InvalidCredentials,

    /// Bad request - malformed or missing input (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Export target not found (HTTP 404, plain text).
    NotFound {
        /// Which table was searched.
        kind: RetentionKind,
    },

    /// Registration collided with an existing account (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    ///
    /// `message` is for logs only; the response body is always generic.
    InternalError {
        /// Error detail.
        message: String,
    },
}

impl RestError {
    /// A 400 for an export request lacking part of the natural key.
    pub fn missing_key(kind: RetentionKind) -> Self {
        let table = match kind {
            RetentionKind::Islr => "ISLR",
            RetentionKind::Iva => "RIVA",
        };
        RestError::BadRequest {
            message: format!("Missing {} parameters", table),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::Unauthorized | RestError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::Unauthorized => write!(f, "Unauthorized"),
            RestError::InvalidCredentials => write!(f, "Invalid credentials"),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::NotFound { kind } => write!(f, "{} data not found.", table_label(*kind)),
            RestError::Conflict { message } => write!(f, "Conflict: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

fn table_label(kind: RetentionKind) -> &'static str {
    match kind {
        RetentionKind::Islr => "ISLR",
        RetentionKind::Iva => "RIVA",
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            RestError::NotFound { kind } => {
                return (
                    status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    format!("{} data not found.", table_label(kind)),
                )
                    .into_response();
            }
            RestError::Unauthorized => "Unauthorized".to_string(),
            RestError::InvalidCredentials => "Invalid credentials".to_string(),
            RestError::InternalError { message } => {
                tracing::error!(error = %message, "Request failed");
                "Internal server error".to_string()
            }
            RestError::BadRequest { message } | RestError::Conflict { message } => message,
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

// Implement conversions from storage errors
impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Record(RecordError::NotFound { kind, .. }) => RestError::NotFound { kind },
            StorageError::Record(RecordError::UserExists { .. }) => RestError::Conflict {
                message: "User already exists or RIF is already registered".to_string(),
            },
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use retenciones_persistence::error::BackendError;

    #[test]
    fn test_missing_key_messages() {
        assert_eq!(
            RestError::missing_key(RetentionKind::Islr).to_string(),
            "Bad request: Missing ISLR parameters"
        );
        assert_eq!(
            RestError::missing_key(RetentionKind::Iva).to_string(),
            "Bad request: Missing RIVA parameters"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = RestError::NotFound {
            kind: RetentionKind::Iva,
        };
        assert_eq!(err.to_string(), "RIVA data not found.");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backend_error_is_internal() {
        let err: RestError = StorageError::Backend(BackendError::QueryError {
            message: "no such table: dp_islr".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_user_exists_is_conflict() {
        let err: RestError = StorageError::Record(RecordError::UserExists {
            username: "ana".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err: RestError = ValidationError::invalid("page", "abc").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response = RestError::InternalError {
            message: "disk I/O error".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
