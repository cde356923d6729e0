//! Core types for the persistence layer.
//!
//! - [`ListingQuery`], [`ListingPage`] - Listing request and merged response
//! - [`IslrRecord`], [`RivaRecord`] - Source rows of `dp_islr` and `dp_riva`
//! - [`UnifiedRow`] - The tagged row emitted by the listing endpoint
//! - [`User`] - Accounts stored in `usuarios`
//!
//! # Example
//!
//! ```
//! use retenciones_persistence::types::{ListingQuery, SortDirection, SortKey, TypeFilter};
//!
//! let query = ListingQuery::new()
//!     .with_type_filter(TypeFilter::Islr)
//!     .with_search_term("J-123")
//!     .with_sort(SortKey::MontoRetenido, SortDirection::Ascending)
//!     .with_limit(2);
//!
//! assert_eq!(query.offset(), 0);
//! ```

mod listing;
mod records;
mod user;

pub use listing::{
    DEFAULT_LIMIT, DEFAULT_PAGE, ListingPage, ListingQuery, RawListingParams, RetentionKind,
    SortDirection, SortKey, TablePage, TypeFilter,
};
pub use records::{IslrKey, IslrRecord, IslrRow, IvaRow, RivaKey, RivaRecord, UnifiedRow};
pub use user::{NewUser, User};
