//! SQLite backend implementation.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{IslrRecord, RivaRecord};

use super::{functions, schema};

/// SQLite backend for withholding records and accounts.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteBackendConfig,
    is_memory: bool,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// How long a request waits for a pooled connection, in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for file databases.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

impl SqliteBackend {
    /// Creates a new in-memory SQLite backend.
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(":memory:", SqliteBackendConfig::default())
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, SqliteBackendConfig::default())
    }

    /// Creates a backend with custom configuration.
    ///
    /// Every `:memory:` connection is a separate database, so an in-memory
    /// backend keeps exactly one pooled connection alive for its lifetime.
    /// Each connection gets the search functions on open.
    pub fn with_config<P: AsRef<Path>>(
        path: P,
        config: SqliteBackendConfig,
    ) -> StorageResult<Self> {
        let path_str = path.as_ref().to_string_lossy();
        let is_memory = path_str == ":memory:";

        let busy_timeout = Duration::from_millis(u64::from(config.busy_timeout_ms));
        let enable_wal = config.enable_wal && !is_memory;
        let manager = SqliteConnectionManager::file(path.as_ref()).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            functions::register(conn)?;
            if enable_wal {
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
            }
            Ok(())
        });

        let builder = Pool::builder().connection_timeout(Duration::from_millis(
            config.connection_timeout_ms,
        ));
        let builder = if is_memory {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            builder
                .max_size(config.max_connections)
                .min_idle(Some(config.min_connections))
        };

        let pool = builder.build(manager).map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })
        })?;

        tracing::info!(
            path = %path_str,
            max_connections = pool.max_size(),
            "SQLite pool ready"
        );

        Ok(Self {
            pool,
            config,
            is_memory,
        })
    }

    /// Creates the withholding and account tables if they are missing.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    /// Get a connection from the pool.
    pub(crate) fn get_connection(
        &self,
    ) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })
        })
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SqliteBackendConfig {
        &self.config
    }

    /// Inserts an ISLR record. Used for seeding and tests.
    pub fn insert_islr(&self, record: &IslrRecord) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO dp_islr (islr_rif, islr_nrofac, islr_nroret, islr_nroctr, islr_fecemi,
                                  islr_bimp, islr_impret, islr_nombre, islr_direcc)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.key.rif,
                record.key.nro_factura,
                record.key.nro_retencion,
                record.nro_control,
                record.fecha_emision,
                record.base_imponible,
                record.monto_retenido,
                record.nombre,
                record.direccion,
            ],
        )
        .map_err(|e| internal_error(format!("Failed to insert ISLR record: {}", e)))?;
        Ok(())
    }

    /// Inserts a RIVA record. Used for seeding and tests.
    pub fn insert_riva(&self, record: &RivaRecord) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO dp_riva (riva_rif, riva_nrocom, riva_nrofac, riva_nroctr, riva_fecdoc,
                                  riva_bimp, riva_iiva, riva_iret, riva_nombre, riva_direcc)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.key.rif,
                record.key.nro_comprobante,
                record.key.nro_factura,
                record.nro_control,
                record.fecha_documento,
                record.base_imponible,
                record.monto_iva,
                record.monto_retenido,
                record.nombre,
                record.direccion,
            ],
        )
        .map_err(|e| internal_error(format!("Failed to insert RIVA record: {}", e)))?;
        Ok(())
    }
}

pub(crate) fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

pub(crate) fn query_error(context: &str, err: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::QueryError {
        message: format!("{}: {}", context, err),
    })
}
