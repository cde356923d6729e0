//! Core storage traits and the listing merger.
//!
//! - [`RetentionStore`] - Read access to `dp_islr` and `dp_riva`
//! - [`UserStore`] - Account lookup and registration
//! - [`list_retentions`] - Merges both tables into one listing page

mod listing;
mod storage;

pub use listing::list_retentions;
pub use storage::{RetentionStore, UserStore};
