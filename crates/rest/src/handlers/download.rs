//! Single-certificate exports.
//!
//! | Route | Format |
//! |-------|--------|
//! | `GET /api/download/islr?islr_rif&islr_nrofac&islr_nroret` | CSV |
//! | `GET /api/download/islr-pdf?islr_rif&islr_nrofac&islr_nroret` | PDF |
//! | `GET /api/download/riva?riva_rif&riva_nrocom&riva_nrofac` | CSV |
//! | `GET /api/download/riva-pdf?riva_rif&riva_nrocom&riva_nrofac` | PDF |
//!
//! All routes require a session, answer 400 when part of the key is
//! missing and 404 (plain text) when no record matches.

use axum::{extract::State, response::Response};
use chrono::Local;
use retenciones_persistence::core::RetentionStore;
use retenciones_persistence::types::{IslrRecord, RetentionKind, RivaRecord};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{IslrKeyParams, RivaKeyParams, SessionCookie};
use crate::responses::attachment;
use crate::responses::certificate::{Agent, Certificate};
use crate::responses::csv::{CSV_CONTENT_TYPE, islr_csv, riva_csv};
use crate::responses::pdf::{PDF_CONTENT_TYPE, render_pdf};
use crate::state::AppState;

async fn load_islr<S>(state: &AppState<S>, params: IslrKeyParams) -> RestResult<IslrRecord>
where
    S: RetentionStore + Send + Sync,
{
    let IslrKeyParams(key) = params;
    debug!(key = %key, "Loading ISLR record");
    state
        .storage()
        .find_islr(&key)
        .await?
        .ok_or(RestError::NotFound {
            kind: RetentionKind::Islr,
        })
}

async fn load_riva<S>(state: &AppState<S>, params: RivaKeyParams) -> RestResult<RivaRecord>
where
    S: RetentionStore + Send + Sync,
{
    let RivaKeyParams(key) = params;
    debug!(key = %key, "Loading RIVA record");
    state
        .storage()
        .find_riva(&key)
        .await?
        .ok_or(RestError::NotFound {
            kind: RetentionKind::Iva,
        })
}

/// Exports one ISLR record as `retenciones_islr.csv`.
pub async fn islr_csv_handler<S>(
    State(state): State<AppState<S>>,
    _session: SessionCookie,
    params: IslrKeyParams,
) -> RestResult<Response>
where
    S: RetentionStore + Send + Sync,
{
    let record = load_islr(&state, params).await?;
    let body = islr_csv(&record)?;
    Ok(attachment(CSV_CONTENT_TYPE, "retenciones_islr.csv", body))
}

/// Exports one RIVA record as `retenciones_riva.csv`.
pub async fn riva_csv_handler<S>(
    State(state): State<AppState<S>>,
    _session: SessionCookie,
    params: RivaKeyParams,
) -> RestResult<Response>
where
    S: RetentionStore + Send + Sync,
{
    let record = load_riva(&state, params).await?;
    let body = riva_csv(&record)?;
    Ok(attachment(CSV_CONTENT_TYPE, "retenciones_riva.csv", body))
}

/// Renders the ISLR certificate as `comprobante_islr_<nroret>.pdf`.
pub async fn islr_pdf_handler<S>(
    State(state): State<AppState<S>>,
    _session: SessionCookie,
    params: IslrKeyParams,
) -> RestResult<Response>
where
    S: RetentionStore + Send + Sync,
{
    let record = load_islr(&state, params).await?;
    let certificate = Certificate::islr(
        &record,
        Agent::from_config(state.config()),
        Local::now().date_naive(),
    );
    let body = render_pdf(&certificate)?;
    Ok(attachment(
        PDF_CONTENT_TYPE,
        &format!("comprobante_islr_{}.pdf", record.key.nro_retencion),
        body,
    ))
}

/// Renders the RIVA certificate as `comprobante_riva_<nrocom>.pdf`.
pub async fn riva_pdf_handler<S>(
    State(state): State<AppState<S>>,
    _session: SessionCookie,
    params: RivaKeyParams,
) -> RestResult<Response>
where
    S: RetentionStore + Send + Sync,
{
    let record = load_riva(&state, params).await?;
    let certificate = Certificate::riva(
        &record,
        Agent::from_config(state.config()),
        Local::now().date_naive(),
    );
    let body = render_pdf(&certificate)?;
    Ok(attachment(
        PDF_CONTENT_TYPE,
        &format!("comprobante_riva_{}.pdf", record.key.nro_comprobante),
        body,
    ))
}
