//! HTTP request handlers.
//!
//! - [`retenciones`] - Combined ISLR/IVA listing
//! - [`download`] - CSV and PDF exports of a single certificate
//! - [`auth`] - Registration, login and logout
//! - [`health`] - Health check endpoint

pub mod auth;
pub mod download;
pub mod health;
pub mod retenciones;

// Re-export handlers for convenience
pub use auth::{login_handler, logout_handler, register_handler};
pub use download::{islr_csv_handler, islr_pdf_handler, riva_csv_handler, riva_pdf_handler};
pub use health::health_handler;
pub use retenciones::retenciones_handler;
