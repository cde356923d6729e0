//! SQL query builder for withholding listings.
//!
//! Produces a row-fetch statement and a `COUNT(*)` statement that share the
//! same search filter, plus the exact-key lookup used by exports.

use crate::types::{ListingQuery, SortDirection, SortKey};

use super::fragment::{SqlFragment, SqlParam};
use super::tables::TableSpec;

/// SQL function every backend registers for case-insensitive search.
///
/// It lowercases text with full Unicode rules, so `MÉRIDA` and `mérida`
/// compare equal.
pub const CASEFOLD_FUNCTION: &str = "casefold";

/// The data and count statements for one table.
#[derive(Debug, Clone)]
pub struct TableQuery {
    /// `SELECT ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...`
    pub select: SqlFragment,
    /// `SELECT COUNT(*) ... WHERE ...` with the same filter parameters.
    pub count: SqlFragment,
}

/// Builds SQL for one [`TableSpec`].
pub struct QueryBuilder<'a> {
    spec: &'a TableSpec,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder for a table.
    pub fn new(spec: &'a TableSpec) -> Self {
        Self { spec }
    }

    /// Builds the WHERE fragment for a search term.
    ///
    /// The term is matched as a case-insensitive substring against every
    /// searchable field, OR-ed together. Both sides go through
    /// [`CASEFOLD_FUNCTION`]. An empty term yields an empty fragment.
    /// `%`, `_` and `\` in the term match literally.
    pub fn search_filter(&self, term: &str) -> SqlFragment {
        let mut fragment = SqlFragment::empty();
        if term.is_empty() {
            return fragment;
        }

        let pattern = format!("%{}%", escape_like(term));
        let clauses: Vec<String> = self
            .spec
            .search_fields
            .iter()
            .map(|field| {
                let placeholder = fragment.add_param(SqlParam::string(pattern.clone()));
                format!(
                    "{fold}({}) LIKE {fold}({}) ESCAPE '\\'",
                    self.spec.column(field),
                    placeholder,
                    fold = CASEFOLD_FUNCTION
                )
            })
            .collect();

        fragment.sql = format!("({})", clauses.join(" OR "));
        fragment
    }

    /// Builds the ORDER BY clause.
    ///
    /// The natural key breaks ties so that consecutive pages do not overlap.
    pub fn order_by(&self, key: SortKey, direction: SortDirection) -> String {
        let mut terms = vec![format!(
            "{} {}",
            self.spec.sort_column(key),
            direction.as_sql()
        )];
        terms.extend(
            self.spec
                .key_fields
                .iter()
                .map(|field| format!("{} ASC", self.spec.column(field))),
        );
        format!("ORDER BY {}", terms.join(", "))
    }

    /// Builds the data and count statements for a listing request.
    pub fn build(&self, query: &ListingQuery) -> TableQuery {
        let filter = self.search_filter(query.search_term());
        let where_clause = if filter.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", filter.sql)
        };

        let count = SqlFragment {
            sql: format!("SELECT COUNT(*) FROM {}{}", self.spec.table, where_clause),
            params: filter.params.clone(),
        };

        let mut select = SqlFragment {
            sql: String::new(),
            params: filter.params,
        };
        let limit = select.add_param(SqlParam::integer(i64::from(query.limit())));
        let offset = select.add_param(SqlParam::integer(
            i64::try_from(query.offset()).unwrap_or(i64::MAX),
        ));
        select.sql = format!(
            "SELECT {} FROM {}{} {} LIMIT {} OFFSET {}",
            self.spec.select_list(),
            self.spec.table,
            where_clause,
            self.order_by(query.sort_key(), query.sort_direction()),
            limit,
            offset
        );

        TableQuery { select, count }
    }

    /// Builds the exact natural-key lookup.
    pub fn key_lookup(&self, key: [&str; 3]) -> SqlFragment {
        let mut fragment = SqlFragment::empty();
        let conditions: Vec<String> = self
            .spec
            .key_fields
            .iter()
            .zip(key)
            .map(|(field, value)| {
                let placeholder = fragment.add_param(SqlParam::string(value));
                format!("{} = {}", self.spec.column(field), placeholder)
            })
            .collect();

        fragment.sql = format!(
            "SELECT {} FROM {} WHERE {} LIMIT 1",
            self.spec.select_list(),
            self.spec.table,
            conditions.join(" AND ")
        );
        fragment
    }
}

/// Escapes LIKE wildcards using `\` as the escape character.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
