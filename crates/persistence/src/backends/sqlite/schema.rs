//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
        tracing::info!(version = SCHEMA_VERSION, "Created retenciones schema");
    }

    Ok(())
}

fn schema_error(context: &str, e: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::SchemaError {
        message: format!("{}: {}", context, e),
    })
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| schema_error("Failed to create schema_version table", e))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| schema_error("Failed to clear schema_version", e))?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| schema_error("Failed to set schema_version", e))?;
    Ok(())
}

/// Create version 1 of the schema.
///
/// Amount columns use NUMERIC affinity so that sorting is numeric while
/// legacy text values still load.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS dp_islr (
            islr_rif TEXT NOT NULL,
            islr_nrofac TEXT NOT NULL,
            islr_nroret TEXT NOT NULL,
            islr_nroctr TEXT,
            islr_fecemi TEXT,
            islr_bimp NUMERIC,
            islr_impret NUMERIC,
            islr_nombre TEXT,
            islr_direcc TEXT,
            PRIMARY KEY (islr_rif, islr_nrofac, islr_nroret)
        );

        CREATE INDEX IF NOT EXISTS idx_islr_fecemi ON dp_islr(islr_fecemi);

        CREATE TABLE IF NOT EXISTS dp_riva (
            riva_rif TEXT NOT NULL,
            riva_nrocom TEXT NOT NULL,
            riva_nrofac TEXT NOT NULL,
            riva_nroctr TEXT,
            riva_fecdoc TEXT,
            riva_bimp NUMERIC,
            riva_iiva NUMERIC,
            riva_iret NUMERIC,
            riva_nombre TEXT,
            riva_direcc TEXT,
            PRIMARY KEY (riva_rif, riva_nrocom, riva_nrofac)
        );

        CREATE INDEX IF NOT EXISTS idx_riva_fecdoc ON dp_riva(riva_fecdoc);

        CREATE TABLE IF NOT EXISTS usuarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            rif TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| schema_error("Failed to create schema", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"dp_islr".to_string()));
        assert!(tables.contains(&"dp_riva".to_string()));
        assert!(tables.contains(&"usuarios".to_string()));
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_numeric_affinity_sorts_numbers() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        for (nro, amount) in [("1", "10"), ("2", "5"), ("3", "20")] {
            conn.execute(
                "INSERT INTO dp_islr (islr_rif, islr_nrofac, islr_nroret, islr_impret) VALUES ('J-1', ?1, ?1, ?2)",
                [nro, amount],
            )
            .unwrap();
        }
        let mut stmt = conn
            .prepare("SELECT islr_impret FROM dp_islr ORDER BY islr_impret ASC")
            .unwrap();
        let amounts: Vec<f64> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(amounts, vec![5.0, 10.0, 20.0]);
    }
}
