//! Merges the ISLR and RIVA tables into one listing page.

use tracing::debug;

use crate::error::StorageResult;
use crate::types::{ListingPage, ListingQuery, RetentionKind, UnifiedRow};

use super::storage::RetentionStore;

/// Runs a listing request against both tables and merges the results.
///
/// Tables excluded by the type filter are not queried. Pagination is applied
/// to each table separately with the same page and limit, so with
/// [`TypeFilter::All`](crate::types::TypeFilter::All) a page can hold up to
/// `2 * limit` rows. ISLR rows come first, each block in its table's sort
/// order. `total` is the sum of both filtered counts.
///
/// Any store error aborts the whole listing.
pub async fn list_retentions<S>(store: &S, query: &ListingQuery) -> StorageResult<ListingPage>
where
    S: RetentionStore + ?Sized,
{
    let mut data: Vec<UnifiedRow> = Vec::new();
    let mut total = 0u64;

    if query.type_filter().includes(RetentionKind::Islr) {
        let page = store.list_islr(query).await?;
        total += page.total;
        data.extend(page.rows.into_iter().map(UnifiedRow::from));
    }

    if query.type_filter().includes(RetentionKind::Iva) {
        let page = store.list_riva(query).await?;
        total += page.total;
        data.extend(page.rows.into_iter().map(UnifiedRow::from));
    }

    debug!(
        rows = data.len(),
        total,
        page = query.page(),
        limit = query.limit(),
        "Listing merged"
    );

    Ok(ListingPage { data, total })
}
