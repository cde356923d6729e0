//! Physical layout of the two withholding tables.

use crate::types::{RetentionKind, SortKey};

/// Column layout of one withholding table.
///
/// Column names are stored without the table prefix; [`TableSpec::column`]
/// joins them.
#[derive(Debug)]
pub struct TableSpec {
    /// Which certificate kind the table holds.
    pub kind: RetentionKind,
    /// Table name.
    pub table: &'static str,
    /// Prefix shared by every column.
    pub prefix: &'static str,
    /// Columns read by listing and export queries, in row-decoding order.
    pub columns: &'static [&'static str],
    /// Columns matched by the free-text search, OR-ed together.
    pub search_fields: &'static [&'static str],
    /// Natural key columns, in key order.
    pub key_fields: [&'static str; 3],
    /// Logical sort key to column. Keys absent here use `default_sort`.
    pub sort_columns: &'static [(SortKey, &'static str)],
    /// Column used when the sort key has no mapping.
    pub default_sort: &'static str,
}

/// `dp_islr`: income-tax withholding.
pub const ISLR_TABLE: TableSpec = TableSpec {
    kind: RetentionKind::Islr,
    table: "dp_islr",
    prefix: "islr_",
    columns: &[
        "rif", "nrofac", "nroret", "nroctr", "fecemi", "bimp", "impret", "nombre", "direcc",
    ],
    search_fields: &["rif", "nrofac", "nroret", "nombre", "direcc"],
    key_fields: ["rif", "nrofac", "nroret"],
    sort_columns: &[
        (SortKey::Rif, "rif"),
        (SortKey::NroFactura, "nrofac"),
        (SortKey::NroComprobante, "nroret"),
        (SortKey::FechaDocumento, "fecemi"),
        (SortKey::BaseImponible, "bimp"),
        (SortKey::MontoRetenido, "impret"),
    ],
    default_sort: "fecemi",
};

/// `dp_riva`: VAT withholding.
pub const RIVA_TABLE: TableSpec = TableSpec {
    kind: RetentionKind::Iva,
    table: "dp_riva",
    prefix: "riva_",
    columns: &[
        "rif", "nrocom", "nrofac", "nroctr", "fecdoc", "bimp", "iiva", "iret", "nombre", "direcc",
    ],
    search_fields: &["rif", "nrocom", "nrofac", "nombre", "direcc"],
    key_fields: ["rif", "nrocom", "nrofac"],
    sort_columns: &[
        (SortKey::Rif, "rif"),
        (SortKey::NroFactura, "nrofac"),
        (SortKey::NroComprobante, "nrocom"),
        (SortKey::FechaDocumento, "fecdoc"),
        (SortKey::BaseImponible, "bimp"),
        (SortKey::MontoRetenido, "iret"),
    ],
    default_sort: "fecdoc",
};

impl TableSpec {
    /// Returns the table layout for a certificate kind.
    pub fn for_kind(kind: RetentionKind) -> &'static TableSpec {
        match kind {
            RetentionKind::Islr => &ISLR_TABLE,
            RetentionKind::Iva => &RIVA_TABLE,
        }
    }

    /// Returns the prefixed column name.
    pub fn column(&self, field: &str) -> String {
        format!("{}{}", self.prefix, field)
    }

    /// Comma-separated, prefixed list of [`TableSpec::columns`].
    pub fn select_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| self.column(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolves a logical sort key to a prefixed column.
    pub fn sort_column(&self, key: SortKey) -> String {
        let field = self
            .sort_columns
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, field)| *field)
            .unwrap_or(self.default_sort);
        self.column(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_mapping() {
        assert_eq!(ISLR_TABLE.sort_column(SortKey::MontoRetenido), "islr_impret");
        assert_eq!(RIVA_TABLE.sort_column(SortKey::MontoRetenido), "riva_iret");
        assert_eq!(ISLR_TABLE.sort_column(SortKey::NroComprobante), "islr_nroret");
        assert_eq!(RIVA_TABLE.sort_column(SortKey::NroComprobante), "riva_nrocom");
    }

    #[test]
    fn test_type_key_uses_default_column() {
        assert_eq!(ISLR_TABLE.sort_column(SortKey::Type), "islr_fecemi");
        assert_eq!(RIVA_TABLE.sort_column(SortKey::Type), "riva_fecdoc");
    }

    #[test]
    fn test_select_list() {
        assert_eq!(
            ISLR_TABLE.select_list(),
            "islr_rif, islr_nrofac, islr_nroret, islr_nroctr, islr_fecemi, islr_bimp, islr_impret, islr_nombre, islr_direcc"
        );
        assert!(RIVA_TABLE.select_list().contains("riva_iiva"));
    }

    #[test]
    fn test_for_kind() {
        assert_eq!(TableSpec::for_kind(RetentionKind::Iva).table, "dp_riva");
    }
}
