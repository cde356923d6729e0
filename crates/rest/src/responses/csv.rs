//! Single-record CSV exports.
//!
//! The header row holds the table's column names, followed by one line for
//! the requested record.

use retenciones_persistence::query::{ISLR_TABLE, RIVA_TABLE, TableSpec};
use retenciones_persistence::types::{IslrRecord, RivaRecord};

use super::ExportError;

/// `Content-Type` of CSV exports.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Amount cell: two decimals with a dot, empty when unknown.
fn amount(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        String::new()
    }
}

fn header(spec: &TableSpec) -> Vec<String> {
    spec.columns.iter().map(|field| spec.column(field)).collect()
}

fn write(header: Vec<String>, row: Vec<String>) -> Result<Vec<u8>, ExportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    writer.write_record(&row)?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

/// Renders an ISLR record as CSV.
pub fn islr_csv(record: &IslrRecord) -> Result<Vec<u8>, ExportError> {
    write(
        header(&ISLR_TABLE),
        vec![
            record.key.rif.clone(),
            record.key.nro_factura.clone(),
            record.key.nro_retencion.clone(),
            record.nro_control.clone().unwrap_or_default(),
            record.fecha_emision.clone().unwrap_or_default(),
            amount(record.base_imponible),
            amount(record.monto_retenido),
            record.nombre.clone().unwrap_or_default(),
            record.direccion.clone().unwrap_or_default(),
        ],
    )
}

/// Renders a RIVA record as CSV.
pub fn riva_csv(record: &RivaRecord) -> Result<Vec<u8>, ExportError> {
    write(
        header(&RIVA_TABLE),
        vec![
            record.key.rif.clone(),
            record.key.nro_comprobante.clone(),
            record.key.nro_factura.clone(),
            record.nro_control.clone().unwrap_or_default(),
            record.fecha_documento.clone().unwrap_or_default(),
            amount(record.base_imponible),
            amount(record.monto_iva),
            amount(record.monto_retenido),
            record.nombre.clone().unwrap_or_default(),
            record.direccion.clone().unwrap_or_default(),
        ],
    )
}
