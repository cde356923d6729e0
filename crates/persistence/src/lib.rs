//! Retenciones Persistence Layer
//!
//! Storage for Venezuelan withholding-tax certificates: ISLR (income tax)
//! rows in `dp_islr`, RIVA (VAT) rows in `dp_riva`, and the `usuarios`
//! accounts table.
//!
//! # Architecture
//!
//! - [`types`] - Listing queries, records and the unified listing row
//! - [`query`] - Parameterized SQL for one withholding table
//! - [`core`] - Storage traits and the two-table listing merger
//! - [`error`] - Error types for all operations
//! - [`backends`] - Backend implementations (SQLite)
//!
//! # Quick Start
//!
//! ```no_run
//! use retenciones_persistence::backends::sqlite::SqliteBackend;
//! use retenciones_persistence::core::list_retentions;
//! use retenciones_persistence::types::{ListingQuery, TypeFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let query = ListingQuery::new()
//!     .with_type_filter(TypeFilter::All)
//!     .with_search_term("J-123");
//! let page = list_retentions(&backend, &query).await?;
//! println!("{} rows of {}", page.data.len(), page.total);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod query;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{ListingPage, ListingQuery, UnifiedRow};

// Re-export core traits
pub use core::{RetentionStore, UserStore, list_retentions};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
