//! Common test utilities for the withholding API.
//!
//! Every test gets its own in-memory database behind the full router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use retenciones_persistence::backends::sqlite::SqliteBackend;
use retenciones_persistence::types::{IslrKey, IslrRecord, RivaKey, RivaRecord};
use retenciones_rest::{AppState, ServerConfig};

/// Header carrying a valid-looking session.
pub const COOKIE: HeaderName = header::COOKIE;

/// Any non-empty session value is accepted.
pub fn session() -> HeaderValue {
    HeaderValue::from_static("session=3f6c1d1e-test; user_rif=J-123")
}

/// Creates a test server over a fresh schema.
pub fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server with a custom configuration.
pub fn create_test_server_with_config(config: ServerConfig) -> (TestServer, Arc<SqliteBackend>) {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let backend = Arc::new(backend);

    let state = AppState::new(Arc::clone(&backend), config);
    let app = retenciones_rest::routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}

pub fn islr(rif: &str, nrofac: &str, nroret: &str, retenido: f64) -> IslrRecord {
    IslrRecord {
        key: IslrKey {
            rif: rif.to_string(),
            nro_factura: nrofac.to_string(),
            nro_retencion: nroret.to_string(),
        },
        nro_control: Some(format!("00-{nrofac}")),
        fecha_emision: Some("2024-05-17".to_string()),
        base_imponible: retenido * 50.0,
        monto_retenido: retenido,
        nombre: Some("Distribuidora Andina C.A.".to_string()),
        direccion: Some("Calle 26, Mérida".to_string()),
    }
}

pub fn riva(rif: &str, nrocom: &str, nrofac: &str, retenido: f64) -> RivaRecord {
    RivaRecord {
        key: RivaKey {
            rif: rif.to_string(),
            nro_comprobante: nrocom.to_string(),
            nro_factura: nrofac.to_string(),
        },
        nro_control: Some(format!("00-{nrofac}")),
        fecha_documento: Some("2024-06-01".to_string()),
        base_imponible: retenido * 100.0 / 12.0,
        monto_iva: retenido * 4.0 / 3.0,
        monto_retenido: retenido,
        nombre: None,
        direccion: None,
    }
}
