//! Listing request and response types.
//!
//! A [`ListingQuery`] is the parsed, immutable form of the listing endpoint's
//! query string. Parsing fails closed: malformed numbers and unknown enum
//! values are rejected instead of being coerced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::records::UnifiedRow;

/// Default page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 15;

/// The two kinds of withholding certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetentionKind {
    /// Income-tax withholding (`dp_islr`).
    #[serde(rename = "ISLR")]
    Islr,
    /// VAT withholding (`dp_riva`).
    #[serde(rename = "IVA")]
    Iva,
}

impl RetentionKind {
    /// Returns the discriminator used in listing rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionKind::Islr => "ISLR",
            RetentionKind::Iva => "IVA",
        }
    }
}

impl fmt::Display for RetentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tables a listing request reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Both tables.
    #[default]
    All,
    /// Only `dp_islr`.
    Islr,
    /// Only `dp_riva`.
    Iva,
}

impl TypeFilter {
    /// Returns true if rows of `kind` are part of the result.
    pub fn includes(&self, kind: RetentionKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Islr => kind == RetentionKind::Islr,
            TypeFilter::Iva => kind == RetentionKind::Iva,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            "ISLR" => Ok(TypeFilter::Islr),
            "IVA" => Ok(TypeFilter::Iva),
            _ => Err(ValidationError::invalid("typeFilter", s)),
        }
    }
}

/// Logical sort keys understood by the listing endpoint.
///
/// Each key maps to a different physical column per table. Unknown keys
/// parse to [`SortKey::FechaDocumento`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Certificate type. Constant within a table.
    Type,
    /// Taxpayer RIF.
    Rif,
    /// Invoice number.
    NroFactura,
    /// Certificate number.
    NroComprobante,
    /// Document or emission date.
    #[default]
    FechaDocumento,
    /// Taxable base.
    BaseImponible,
    /// Withheld amount.
    MontoRetenido,
}

impl SortKey {
    /// Maps a `sortColumn` value to a key, falling back to the date.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "type" => SortKey::Type,
            "rif" => SortKey::Rif,
            "nro_factura" => SortKey::NroFactura,
            "nro_comprobante" => SortKey::NroComprobante,
            "fecha_documento" => SortKey::FechaDocumento,
            "base_imponible" => SortKey::BaseImponible,
            "monto_retenido" => SortKey::MontoRetenido,
            _ => SortKey::FechaDocumento,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order.
    Ascending,
    /// Descending order.
    #[default]
    Descending,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(ValidationError::invalid("sortDirection", s)),
        }
    }
}

/// A parsed listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    page: u32,
    limit: u32,
    search_term: String,
    type_filter: TypeFilter,
    sort_key: SortKey,
    sort_direction: SortDirection,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search_term: String::new(),
            type_filter: TypeFilter::All,
            sort_key: SortKey::FechaDocumento,
            sort_direction: SortDirection::Descending,
        }
    }
}

impl ListingQuery {
    /// Creates a query with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 1-based page number. Zero is clamped to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the per-table page size. Zero is clamped to 1.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Sets the free-text search term.
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Sets the type filter.
    pub fn with_type_filter(mut self, filter: TypeFilter) -> Self {
        self.type_filter = filter;
        self
    }

    /// Sets the sort key and direction.
    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self
    }

    /// Builds a query from raw query-string values.
    ///
    /// Absent or empty values take their defaults, with `default_limit` as
    /// the page size. A `limit` above `max_limit` is rejected.
    pub fn from_raw(
        raw: &RawListingParams,
        default_limit: u32,
        max_limit: u32,
    ) -> Result<Self, ValidationError> {
        let page = parse_positive("page", raw.page.as_deref(), DEFAULT_PAGE)?;
        let limit = parse_positive("limit", raw.limit.as_deref(), default_limit)?;
        if limit > max_limit {
            return Err(ValidationError::TooLarge {
                parameter: "limit".to_string(),
                max: max_limit,
            });
        }

        let type_filter = match non_empty(raw.type_filter.as_deref()) {
            Some(value) => value.parse()?,
            None => TypeFilter::All,
        };

        let sort_key = non_empty(raw.sort_column.as_deref())
            .map(SortKey::parse_lenient)
            .unwrap_or_default();

        let sort_direction = match non_empty(raw.sort_direction.as_deref()) {
            Some(value) => value.parse()?,
            None => SortDirection::Descending,
        };

        Ok(Self {
            page,
            limit,
            search_term: raw.search_term.clone().unwrap_or_default(),
            type_filter,
            sort_key,
            sort_direction,
        })
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the per-table page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of rows skipped in each table.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Returns the search term (empty means no filter).
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns the type filter.
    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    /// Returns the logical sort key.
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Returns the sort direction.
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }
}

/// Raw listing parameters as they appear in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListingParams {
    /// `page`
    pub page: Option<String>,
    /// `limit`
    pub limit: Option<String>,
    /// `searchTerm`
    pub search_term: Option<String>,
    /// `typeFilter`: `all`, `ISLR` or `IVA`
    pub type_filter: Option<String>,
    /// `sortColumn`
    pub sort_column: Option<String>,
    /// `sortDirection`: `asc` or `desc`
    pub sort_direction: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_positive(name: &str, value: Option<&str>, default: u32) -> Result<u32, ValidationError> {
    let Some(value) = non_empty(value) else {
        return Ok(default);
    };
    let parsed: u32 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid(name, value))?;
    if parsed == 0 {
        return Err(ValidationError::OutOfRange {
            parameter: name.to_string(),
            min: 1,
        });
    }
    Ok(parsed)
}

/// One table's slice of a listing page.
#[derive(Debug, Clone)]
pub struct TablePage<T> {
    /// Rows on this page.
    pub rows: Vec<T>,
    /// Rows matching the filter, ignoring pagination.
    pub total: u64,
}

impl<T> TablePage<T> {
    /// A page with no rows and a zero total.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }
}

/// The merged listing response.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    /// ISLR rows followed by IVA rows.
    pub data: Vec<UnifiedRow>,
    /// Sum of both tables' filtered counts.
    pub total: u64,
}
