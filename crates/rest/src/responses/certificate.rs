//! Printable withholding certificate.
//!
//! A [`Certificate`] is the fixed layout shared by the ISLR and RIVA
//! comprobantes: a title, the issuing agent, the withheld subject and a
//! list of labelled detail lines. Amounts and dates are formatted the way
//! they are printed in Venezuela (`1.234,56`, `dd/mm/yyyy`).

use chrono::{NaiveDate, NaiveDateTime};
use retenciones_persistence::types::{IslrRecord, RivaRecord};

use crate::config::ServerConfig;

/// Subject name printed when a RIVA record carries none.
pub const DEFAULT_SUBJECT_NAME: &str = "Sujeto Retenido S.A.";

/// The issuing agent block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// Agent RIF.
    pub rif: String,
    /// Agent legal name.
    pub name: String,
    /// Agent fiscal address.
    pub address: String,
}

impl Agent {
    /// Reads the agent block from configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            rif: config.agent_rif.clone(),
            name: config.agent_name.clone(),
            address: config.agent_address.clone(),
        }
    }
}

/// A one-page withholding certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    /// Heading line.
    pub title: String,
    /// Certificate number (ISLR `nroret`, RIVA `nrocom`).
    pub number: String,
    /// Issue date printed on the certificate.
    pub issued_on: NaiveDate,
    /// Issuing agent.
    pub agent: Agent,
    /// Withheld subject name.
    pub subject_name: String,
    /// Withheld subject RIF.
    pub subject_rif: String,
    /// Withheld subject address, when known.
    pub subject_address: Option<String>,
    /// Labelled detail lines.
    pub lines: Vec<(String, String)>,
}

impl Certificate {
    /// Builds an ISLR certificate.
    pub fn islr(record: &IslrRecord, agent: Agent, issued_on: NaiveDate) -> Self {
        Self {
            title: "COMPROBANTE DE RETENCIÓN DE IMPUESTO SOBRE LA RENTA".to_string(),
            number: record.key.nro_retencion.clone(),
            issued_on,
            agent,
            subject_name: record.nombre.clone().unwrap_or_default(),
            subject_rif: record.key.rif.clone(),
            subject_address: record.direccion.clone(),
            lines: vec![
                line("Nro. Factura", &record.key.nro_factura),
                line("Nro. Control", record.nro_control.as_deref().unwrap_or("")),
                line("Fecha Factura", &format_date(record.fecha_emision.as_deref())),
                line("Monto Factura", &format_amount(record.base_imponible)),
                line("Monto Retenido", &format_amount(record.monto_retenido)),
            ],
        }
    }

    /// Builds a RIVA certificate.
    pub fn riva(record: &RivaRecord, agent: Agent, issued_on: NaiveDate) -> Self {
        let subject_name = record
            .nombre
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT_NAME.to_string());

        Self {
            title: "COMPROBANTE DE RETENCIÓN DEL IMPUESTO AL VALOR AGREGADO".to_string(),
            number: record.key.nro_comprobante.clone(),
            issued_on,
            agent,
            subject_name,
            subject_rif: record.key.rif.clone(),
            subject_address: record.direccion.clone(),
            lines: vec![
                line("Nro. Factura", &record.key.nro_factura),
                line("Nro. Control", record.nro_control.as_deref().unwrap_or("")),
                line("Fecha Factura", &format_date(record.fecha_documento.as_deref())),
                line("Base Imponible", &format_amount(record.base_imponible)),
                line("Monto IVA", &format_amount(record.monto_iva)),
                line("IVA Retenido", &format_amount(record.monto_retenido)),
            ],
        }
    }
}

fn line(label: &str, value: &str) -> (String, String) {
    (label.to_string(), value.to_string())
}

/// Formats an amount as `1.234,56`. NaN prints as `-`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}

/// Formats a stored date as `dd/mm/yyyy`.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time. Anything else is
/// printed unchanged; a missing date prints empty.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return String::new();
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.fZ"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, pattern) {
            return datetime.format("%d/%m/%Y").to_string();
        }
    }
    raw.to_string()
}
