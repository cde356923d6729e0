//! Scalar SQL functions registered on every pooled connection.

use rusqlite::Connection;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;

use crate::query::CASEFOLD_FUNCTION;

/// Registers the functions the query builder emits.
pub(crate) fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        CASEFOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        casefold,
    )
}

/// Unicode lowercase of the argument. NULL stays NULL; numbers are folded
/// as their text form so they still match substrings.
fn casefold(ctx: &Context<'_>) -> rusqlite::Result<Option<String>> {
    let folded = match ctx.get_raw(0) {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).to_lowercase()),
    };
    Ok(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(conn: &Connection, value: &str) -> Option<String> {
        conn.query_row("SELECT casefold(?1)", [value], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_casefold_accents_and_enye() {
        let conn = Connection::open_in_memory().unwrap();
        register(&conn).unwrap();

        assert_eq!(fold(&conn, "INVERSIONES MÉRIDA C.A.").as_deref(), Some("inversiones mérida c.a."));
        assert_eq!(fold(&conn, "PEÑA").as_deref(), Some("peña"));
    }

    #[test]
    fn test_casefold_null_and_numbers() {
        let conn = Connection::open_in_memory().unwrap();
        register(&conn).unwrap();

        let null: Option<String> = conn
            .query_row("SELECT casefold(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);

        let number: Option<String> = conn
            .query_row("SELECT casefold(123)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(number.as_deref(), Some("123"));
    }

    #[test]
    fn test_like_matches_across_case() {
        let conn = Connection::open_in_memory().unwrap();
        register(&conn).unwrap();

        let matched: bool = conn
            .query_row(
                "SELECT casefold('Panadería ÑANDÚ') LIKE casefold('%ñandú%') ESCAPE '\\'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(matched);
    }
}
