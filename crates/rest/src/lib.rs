//! # retenciones-rest - Withholding certificates HTTP API
//!
//! This crate serves the ISLR (income tax) and IVA (value-added tax)
//! withholding records kept in `dp_islr` and `dp_riva`. It lists both
//! tables through one paginated endpoint, exports a single record as a CSV
//! file or a printable PDF certificate, and manages the session cookie that
//! gates those routes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use retenciones_rest::{create_app, ServerConfig};
//! use retenciones_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("retenciones.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | URL | Session | Description |
//! |--------|-----|---------|-------------|
//! | GET | `/api/retenciones` | yes | Combined listing |
//! | GET | `/api/download/islr` | yes | ISLR record as CSV |
//! | GET | `/api/download/islr-pdf` | yes | ISLR certificate as PDF |
//! | GET | `/api/download/riva` | yes | IVA record as CSV |
//! | GET | `/api/download/riva-pdf` | yes | IVA certificate as PDF |
//! | POST | `/api/auth/register` | no | Create an account |
//! | POST | `/api/auth/login` | no | Start a session |
//! | GET | `/api/auth/logout` | no | End the session |
//! | GET | `/health` | no | Store round-trip |
//!
//! ## Listing Parameters
//!
//! `page`, `limit`, `sortColumn`, `sortDirection`, `searchTerm` and
//! `typeFilter` (`all`, `ISLR` or `IVA`). Pagination applies to each table
//! separately, so an `all` page holds up to `2 * limit` rows.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Session, listing and natural-key extractors
//! - [`responses`] - CSV, PDF and cookie rendering
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use retenciones_persistence::core::{RetentionStore, UserStore};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: RetentionStore + UserStore + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust,ignore
/// use retenciones_rest::{create_app_with_config, ServerConfig};
/// use retenciones_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let config = ServerConfig {
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: RetentionStore + UserStore + Send + Sync + 'static,
{
    info!(
        "Creating withholding API server with backend: {}",
        storage.backend_name()
    );

    let request_timeout = config.request_timeout;
    let cors = config.enable_cors.then(|| build_cors_layer(&config));

    let state = AppState::new(Arc::new(storage), config);
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(request_timeout),
        ));

    // Add CORS if enabled
    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over `level` when it is set. Call once at startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "retenciones_rest={level},retenciones_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
