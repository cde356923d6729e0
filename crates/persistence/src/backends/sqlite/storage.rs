//! RetentionStore and UserStore implementations for SQLite.

use async_trait::async_trait;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params, params_from_iter};
use tracing::debug;

use crate::core::{RetentionStore, UserStore};
use crate::error::{RecordError, StorageError, StorageResult};
use crate::query::{ISLR_TABLE, QueryBuilder, RIVA_TABLE, SqlFragment};
use crate::types::{
    IslrKey, IslrRecord, ListingQuery, NewUser, RivaKey, RivaRecord, TablePage, User,
};

use super::SqliteBackend;
use super::backend::query_error;
use super::values::{amount, opt_text, text, to_value};

/// Maps a row selected with `ISLR_TABLE.select_list()`.
fn islr_from_row(row: &Row<'_>) -> rusqlite::Result<IslrRecord> {
    Ok(IslrRecord {
        key: IslrKey {
            rif: text(row, 0)?,
            nro_factura: text(row, 1)?,
            nro_retencion: text(row, 2)?,
        },
        nro_control: opt_text(row, 3)?,
        fecha_emision: opt_text(row, 4)?,
        base_imponible: amount(row, 5)?,
        monto_retenido: amount(row, 6)?,
        nombre: opt_text(row, 7)?,
        direccion: opt_text(row, 8)?,
    })
}

/// Maps a row selected with `RIVA_TABLE.select_list()`.
fn riva_from_row(row: &Row<'_>) -> rusqlite::Result<RivaRecord> {
    Ok(RivaRecord {
        key: RivaKey {
            rif: text(row, 0)?,
            nro_comprobante: text(row, 1)?,
            nro_factura: text(row, 2)?,
        },
        nro_control: opt_text(row, 3)?,
        fecha_documento: opt_text(row, 4)?,
        base_imponible: amount(row, 5)?,
        monto_iva: amount(row, 6)?,
        monto_retenido: amount(row, 7)?,
        nombre: opt_text(row, 8)?,
        direccion: opt_text(row, 9)?,
    })
}

fn count(conn: &Connection, fragment: &SqlFragment) -> StorageResult<u64> {
    let total: i64 = conn
        .query_row(
            &fragment.sql,
            params_from_iter(fragment.params.iter().map(to_value)),
            |row| row.get(0),
        )
        .map_err(|e| query_error("Failed to count rows", e))?;
    Ok(u64::try_from(total).unwrap_or(0))
}

fn fetch<T>(
    conn: &Connection,
    fragment: &SqlFragment,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> StorageResult<Vec<T>> {
    let mut stmt = conn
        .prepare(&fragment.sql)
        .map_err(|e| query_error("Failed to prepare query", e))?;
    let rows = stmt
        .query_map(params_from_iter(fragment.params.iter().map(to_value)), map)
        .map_err(|e| query_error("Failed to run query", e))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| query_error("Failed to read row", e))
}

fn fetch_one<T>(
    conn: &Connection,
    fragment: &SqlFragment,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> StorageResult<Option<T>> {
    conn.query_row(
        &fragment.sql,
        params_from_iter(fragment.params.iter().map(to_value)),
        map,
    )
    .optional()
    .map_err(|e| query_error("Failed to look up record", e))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        rif: row.get(2)?,
        password_hash: row.get(3)?,
    })
}

#[async_trait]
impl RetentionStore for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn list_islr(&self, query: &ListingQuery) -> StorageResult<TablePage<IslrRecord>> {
        let conn = self.get_connection()?;
        let built = QueryBuilder::new(&ISLR_TABLE).build(query);
        debug!(sql = %built.select.sql, "Listing ISLR");

        let total = count(&conn, &built.count)?;
        let rows = fetch(&conn, &built.select, islr_from_row)?;
        Ok(TablePage { rows, total })
    }

    async fn list_riva(&self, query: &ListingQuery) -> StorageResult<TablePage<RivaRecord>> {
        let conn = self.get_connection()?;
        let built = QueryBuilder::new(&RIVA_TABLE).build(query);
        debug!(sql = %built.select.sql, "Listing RIVA");

        let total = count(&conn, &built.count)?;
        let rows = fetch(&conn, &built.select, riva_from_row)?;
        Ok(TablePage { rows, total })
    }

    async fn find_islr(&self, key: &IslrKey) -> StorageResult<Option<IslrRecord>> {
        let conn = self.get_connection()?;
        let lookup = QueryBuilder::new(&ISLR_TABLE).key_lookup([
            &key.rif,
            &key.nro_factura,
            &key.nro_retencion,
        ]);
        fetch_one(&conn, &lookup, islr_from_row)
    }

    async fn find_riva(&self, key: &RivaKey) -> StorageResult<Option<RivaRecord>> {
        let conn = self.get_connection()?;
        let lookup = QueryBuilder::new(&RIVA_TABLE).key_lookup([
            &key.rif,
            &key.nro_comprobante,
            &key.nro_factura,
        ]);
        fetch_one(&conn, &lookup, riva_from_row)
    }

    async fn health_check(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| query_error("Health check failed", e))?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteBackend {
    async fn find_user(&self, username: &str) -> StorageResult<Option<User>> {
        let conn = self.get_connection()?;
        conn.query_row(
            "SELECT id, username, rif, password FROM usuarios WHERE username = ?1",
            params![username],
            user_from_row,
        )
        .optional()
        .map_err(|e| query_error("Failed to look up user", e))
    }

    async fn user_exists(&self, username: &str, rif: &str) -> StorageResult<bool> {
        let conn = self.get_connection()?;
        let matches: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM usuarios WHERE username = ?1 OR rif = ?2",
                params![username, rif],
                |row| row.get(0),
            )
            .map_err(|e| query_error("Failed to check user", e))?;
        Ok(matches > 0)
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let conn = self.get_connection()?;
        let result = conn.execute(
            "INSERT INTO usuarios (username, rif, password) VALUES (?1, ?2, ?3)",
            params![user.username, user.rif, user.password_hash],
        );

        match result {
            Ok(_) => Ok(User {
                id: conn.last_insert_rowid(),
                username: user.username,
                rif: user.rif,
                password_hash: user.password_hash,
            }),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::Record(RecordError::UserExists {
                    username: user.username,
                }))
            }
            Err(e) => Err(query_error("Failed to create user", e)),
        }
    }
}
