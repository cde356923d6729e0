//! Axum extractors for the withholding API.
//!
//! - [`SessionCookie`] - Rejects requests without a `session` cookie
//! - [`Listing`] - Parses the listing query string into a
//!   [`ListingQuery`](retenciones_persistence::types::ListingQuery)
//! - [`IslrKeyParams`], [`RivaKeyParams`] - Natural keys for exports

mod listing;
mod record_key;
mod session;

pub use listing::Listing;
pub use record_key::{IslrKeyParams, RivaKeyParams};
pub use session::{SESSION_COOKIE, SessionCookie, USER_RIF_COOKIE, cookie_value};
