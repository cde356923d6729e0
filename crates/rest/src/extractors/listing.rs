//! Listing query extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use retenciones_persistence::types::{ListingQuery, RawListingParams};

use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor producing a validated [`ListingQuery`].
///
/// Reads `page`, `limit`, `searchTerm`, `typeFilter`, `sortColumn` and
/// `sortDirection`. Absent values take their defaults; malformed numbers or
/// enum values reject the request with 400.
#[derive(Debug, Clone)]
pub struct Listing(pub ListingQuery);

impl<S> FromRequestParts<AppState<S>> for Listing
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawListingParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        let query = ListingQuery::from_raw(&raw, state.default_page_size(), state.max_page_size())?;
        Ok(Listing(query))
    }
}
