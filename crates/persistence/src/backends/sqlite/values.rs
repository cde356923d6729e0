//! Conversions from loosely typed SQLite cells.
//!
//! Legacy rows may carry amounts as text and keys as numbers, so every read
//! goes through [`ValueRef`] rather than a typed `row.get`.

use rusqlite::Row;
use rusqlite::types::{Value, ValueRef};

use crate::query::SqlParam;

/// Converts a bound parameter into an owned SQLite value.
pub(crate) fn to_value(param: &SqlParam) -> Value {
    match param {
        SqlParam::String(s) => Value::Text(s.clone()),
        SqlParam::Integer(i) => Value::Integer(*i),
    }
}

/// Reads a key column as text. NULL reads as an empty string.
pub(crate) fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(opt_text(row, idx)?.unwrap_or_default())
}

/// Reads a nullable text column, rendering numbers in their shortest form.
pub(crate) fn opt_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

/// Reads an amount column. Missing or unparseable values read as NaN.
pub(crate) fn amount(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(i) => i as f64,
        ValueRef::Real(f) => f,
        ValueRef::Text(bytes) => parse_leading_number(&String::from_utf8_lossy(bytes)),
        ValueRef::Null | ValueRef::Blob(_) => f64::NAN,
    })
}

/// Parses the longest numeric prefix of `s`, ignoring leading whitespace.
///
/// `"12.50 Bs"` reads as `12.5`; `"abc"` reads as NaN.
pub(crate) fn parse_leading_number(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("12.5"), 12.5);
        assert_eq!(parse_leading_number("  7"), 7.0);
        assert_eq!(parse_leading_number("12.50 Bs"), 12.5);
        assert_eq!(parse_leading_number("-3.25"), -3.25);
        assert_eq!(parse_leading_number(".5"), 0.5);
        assert_eq!(parse_leading_number("1e3"), 1000.0);
        assert_eq!(parse_leading_number("1e"), 1.0);
        assert_eq!(parse_leading_number("1,234.50"), 1.0);
    }

    #[test]
    fn test_parse_leading_number_nan() {
        assert!(parse_leading_number("").is_nan());
        assert!(parse_leading_number("abc").is_nan());
        assert!(parse_leading_number("-").is_nan());
        assert!(parse_leading_number(".").is_nan());
    }

    #[test]
    fn test_cell_reads() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.query_row(
            "SELECT NULL, 42, 2.5, 'x1', '9.75'",
            [],
            |row| {
                assert_eq!(text(row, 0)?, "");
                assert_eq!(opt_text(row, 0)?, None);
                assert_eq!(text(row, 1)?, "42");
                assert_eq!(opt_text(row, 3)?.as_deref(), Some("x1"));
                assert!(amount(row, 0)?.is_nan());
                assert_eq!(amount(row, 1)?, 42.0);
                assert_eq!(amount(row, 2)?, 2.5);
                assert!(amount(row, 3)?.is_nan());
                assert_eq!(amount(row, 4)?, 9.75);
                Ok(())
            },
        )
        .unwrap();
    }
}
