//! Response rendering for exports and sessions.
//!
//! - [`certificate`] - The printable withholding certificate model
//! - [`csv`] - Single-record CSV exports
//! - [`pdf`] - One-page PDF certificates
//! - [`cookies`] - `Set-Cookie` values for the session

pub mod certificate;
pub mod cookies;
pub mod csv;
pub mod pdf;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::RestError;

/// Errors raised while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] ::csv::Error),

    /// PDF assembly failed.
    #[error("PDF export failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the document failed.
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output buffer could not be recovered from a writer.
    #[error("export buffer error: {0}")]
    Buffer(String),
}

impl From<ExportError> for RestError {
    fn from(err: ExportError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Wraps bytes as a file download.
pub fn attachment(content_type: &'static str, filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", sanitize_filename(filename)),
            ),
        ],
        body,
    )
        .into_response()
}

/// Keeps filename characters that are safe inside a quoted header value.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
