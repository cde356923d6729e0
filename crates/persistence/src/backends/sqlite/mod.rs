//! SQLite backend implementation.
//!
//! Stores the `dp_islr` and `dp_riva` withholding tables and the `usuarios`
//! account table. In-memory databases are meant for tests; file databases
//! for development and small deployments.
//!
//! # Example
//!
//! ```no_run
//! use retenciones_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("./data/retenciones.db")?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE dp_islr (
//!     islr_rif TEXT NOT NULL,
//!     islr_nrofac TEXT NOT NULL,
//!     islr_nroret TEXT NOT NULL,
//!     islr_nroctr TEXT,
//!     islr_fecemi TEXT,
//!     islr_bimp NUMERIC,
//!     islr_impret NUMERIC,
//!     islr_nombre TEXT,
//!     islr_direcc TEXT,
//!     PRIMARY KEY (islr_rif, islr_nrofac, islr_nroret)
//! );
//!
//! CREATE TABLE dp_riva (
//!     riva_rif TEXT NOT NULL,
//!     riva_nrocom TEXT NOT NULL,
//!     riva_nrofac TEXT NOT NULL,
//!     riva_nroctr TEXT,
//!     riva_fecdoc TEXT,
//!     riva_bimp NUMERIC,
//!     riva_iiva NUMERIC,
//!     riva_iret NUMERIC,
//!     riva_nombre TEXT,
//!     riva_direcc TEXT,
//!     PRIMARY KEY (riva_rif, riva_nrocom, riva_nrofac)
//! );
//!
//! CREATE TABLE usuarios (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     username TEXT NOT NULL UNIQUE,
//!     rif TEXT NOT NULL UNIQUE,
//!     password TEXT NOT NULL
//! );
//! ```

mod backend;
mod functions;
mod schema;
mod storage;
mod values;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
