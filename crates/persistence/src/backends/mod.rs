//! Database backend implementations.
//!
//! Each backend implements [`RetentionStore`](crate::core::RetentionStore)
//! and [`UserStore`](crate::core::UserStore) and is gated behind a feature
//! flag.
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | SQLite | `sqlite` | Embedded database with a pooled connection set |

#[cfg(feature = "sqlite")]
pub mod sqlite;
