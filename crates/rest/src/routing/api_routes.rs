//! API route definitions.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/health` | [`health_handler`](handlers::health_handler) |
//! | GET | `/api/retenciones` | [`retenciones_handler`](handlers::retenciones_handler) |
//! | GET | `/api/download/islr` | [`islr_csv_handler`](handlers::islr_csv_handler) |
//! | GET | `/api/download/islr-pdf` | [`islr_pdf_handler`](handlers::islr_pdf_handler) |
//! | GET | `/api/download/riva` | [`riva_csv_handler`](handlers::riva_csv_handler) |
//! | GET | `/api/download/riva-pdf` | [`riva_pdf_handler`](handlers::riva_pdf_handler) |
//! | POST | `/api/auth/register` | [`register_handler`](handlers::register_handler) |
//! | POST | `/api/auth/login` | [`login_handler`](handlers::login_handler) |
//! | GET | `/api/auth/logout` | [`logout_handler`](handlers::logout_handler) |

use axum::{
    Router,
    routing::{get, post},
};
use retenciones_persistence::core::{RetentionStore, UserStore};

use crate::handlers;
use crate::state::AppState;

/// Creates the router with all API routes.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RetentionStore + UserStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        // Listing
        .route("/api/retenciones", get(handlers::retenciones_handler::<S>))
        // Exports
        .route("/api/download/islr", get(handlers::islr_csv_handler::<S>))
        .route("/api/download/islr-pdf", get(handlers::islr_pdf_handler::<S>))
        .route("/api/download/riva", get(handlers::riva_csv_handler::<S>))
        .route("/api/download/riva-pdf", get(handlers::riva_pdf_handler::<S>))
        // Accounts
        .route("/api/auth/register", post(handlers::register_handler::<S>))
        .route("/api/auth/login", post(handlers::login_handler::<S>))
        .route("/api/auth/logout", get(handlers::logout_handler::<S>))
        // State
        .with_state(state)
}
