//! Combined withholding listing.
//!
//! `GET /api/retenciones?page&limit&searchTerm&typeFilter&sortColumn&sortDirection`

use axum::{Json, extract::State};
use retenciones_persistence::core::{RetentionStore, list_retentions};
use retenciones_persistence::types::ListingPage;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{Listing, SessionCookie};
use crate::state::AppState;

/// Handler for the listing endpoint.
///
/// # Response
///
/// - `200 OK` - `{"data": [...], "total": n}`, ISLR rows before IVA rows
/// - `400 Bad Request` - Malformed `page`, `limit`, `typeFilter` or
///   `sortDirection`
/// - `401 Unauthorized` - No session cookie
/// - `500 Internal Server Error` - Store failure
///
/// Each table is paginated on its own, so an unfiltered page holds up to
/// `2 * limit` rows.
pub async fn retenciones_handler<S>(
    State(state): State<AppState<S>>,
    _session: SessionCookie,
    Listing(query): Listing,
) -> RestResult<Json<ListingPage>>
where
    S: RetentionStore + Send + Sync,
{
    debug!(
        page = query.page(),
        limit = query.limit(),
        search = %query.search_term(),
        type_filter = ?query.type_filter(),
        sort = ?query.sort_key(),
        direction = query.sort_direction().as_sql(),
        "Processing listing request"
    );

    let page = list_retentions(state.storage(), &query).await?;
    Ok(Json(page))
}
