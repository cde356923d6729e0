//! Natural-key extractors for the export endpoints.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use retenciones_persistence::types::{IslrKey, RetentionKind, RivaKey};
use serde::Deserialize;

use crate::error::RestError;

#[derive(Debug, Default, Deserialize)]
struct RawIslrKey {
    islr_rif: Option<String>,
    islr_nrofac: Option<String>,
    islr_nroret: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRivaKey {
    riva_rif: Option<String>,
    riva_nrocom: Option<String>,
    riva_nrofac: Option<String>,
}

/// `islr_rif`, `islr_nrofac` and `islr_nroret` from the query string.
///
/// Rejects with 400 `Missing ISLR parameters` when any part is absent or
/// empty.
#[derive(Debug, Clone)]
pub struct IslrKeyParams(pub IslrKey);

/// `riva_rif`, `riva_nrocom` and `riva_nrofac` from the query string.
///
/// Rejects with 400 `Missing RIVA parameters` when any part is absent or
/// empty.
#[derive(Debug, Clone)]
pub struct RivaKeyParams(pub RivaKey);

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for IslrKeyParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let missing = || RestError::missing_key(RetentionKind::Islr);
        let Query(raw) = Query::<RawIslrKey>::from_request_parts(parts, state)
            .await
            .map_err(|_| missing())?;

        match (
            required(raw.islr_rif),
            required(raw.islr_nrofac),
            required(raw.islr_nroret),
        ) {
            (Some(rif), Some(nro_factura), Some(nro_retencion)) => Ok(IslrKeyParams(IslrKey {
                rif,
                nro_factura,
                nro_retencion,
            })),
            _ => Err(missing()),
        }
    }
}

impl<S> FromRequestParts<S> for RivaKeyParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let missing = || RestError::missing_key(RetentionKind::Iva);
        let Query(raw) = Query::<RawRivaKey>::from_request_parts(parts, state)
            .await
            .map_err(|_| missing())?;

        match (
            required(raw.riva_rif),
            required(raw.riva_nrocom),
            required(raw.riva_nrofac),
        ) {
            (Some(rif), Some(nro_comprobante), Some(nro_factura)) => Ok(RivaKeyParams(RivaKey {
                rif,
                nro_comprobante,
                nro_factura,
            })),
            _ => Err(missing()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract_islr(uri: &str) -> Result<IslrKeyParams, RestError> {
        let request = axum::http::Request::builder().uri(uri).body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        IslrKeyParams::from_request_parts(&mut parts, &()).await
    }

    async fn extract_riva(uri: &str) -> Result<RivaKeyParams, RestError> {
        let request = axum::http::Request::builder().uri(uri).body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        RivaKeyParams::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_islr_key_complete() {
        let IslrKeyParams(key) =
            extract_islr("/x?islr_rif=J-123&islr_nrofac=100&islr_nroret=200")
                .await
                .unwrap();
        assert_eq!(key.rif, "J-123");
        assert_eq!(key.nro_factura, "100");
        assert_eq!(key.nro_retencion, "200");
    }

    #[tokio::test]
    async fn test_islr_key_missing_part() {
        let err = extract_islr("/x?islr_rif=J-123&islr_nrofac=100")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Missing ISLR parameters");
    }

    #[tokio::test]
    async fn test_islr_key_empty_part() {
        assert!(
            extract_islr("/x?islr_rif=J-123&islr_nrofac=&islr_nroret=1")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_riva_key() {
        let RivaKeyParams(key) =
            extract_riva("/x?riva_rif=J-1&riva_nrocom=2024010001&riva_nrofac=55")
                .await
                .unwrap();
        assert_eq!(key.nro_comprobante, "2024010001");

        let err = extract_riva("/x").await.unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Missing RIVA parameters");
    }
}
