//! Query construction for the withholding tables.
//!
//! [`QueryBuilder`] turns a [`ListingQuery`](crate::types::ListingQuery) into
//! parameterized SQL for a single [`TableSpec`]. Sort columns are resolved
//! from a fixed whitelist, so only bound parameters carry user input.

mod builder;
mod fragment;
mod tables;

pub use builder::{CASEFOLD_FUNCTION, QueryBuilder, TableQuery};
pub use fragment::{SqlFragment, SqlParam};
pub use tables::{ISLR_TABLE, RIVA_TABLE, TableSpec};
