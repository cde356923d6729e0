//! Health check endpoint handler.
//!
//! Provides a health check endpoint for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use retenciones_persistence::core::RetentionStore;
use tracing::{debug, error};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Runs a trivial query against the store.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Store answered
/// - `503 Service Unavailable` - Store did not answer
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: RetentionStore + Send + Sync,
{
    debug!("Processing health check request");

    let backend_name = state.storage().backend_name();
    let timestamp = chrono::Utc::now().to_rfc3339();

    match state.storage().health_check().await {
        Ok(()) => {
            let body = serde_json::json!({
                "status": "healthy",
                "backend": backend_name,
                "timestamp": timestamp
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, backend = backend_name, "Health check failed");
            let body = serde_json::json!({
                "status": "unhealthy",
                "backend": backend_name,
                "timestamp": timestamp
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
