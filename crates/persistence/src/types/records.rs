//! Withholding-certificate records and the unified listing row.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Natural key of an ISLR certificate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IslrKey {
    /// Taxpayer RIF (`islr_rif`).
    pub rif: String,
    /// Invoice number (`islr_nrofac`).
    pub nro_factura: String,
    /// Withholding number (`islr_nroret`).
    pub nro_retencion: String,
}

impl fmt::Display for IslrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.rif, self.nro_factura, self.nro_retencion)
    }
}

/// Natural key of a RIVA certificate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RivaKey {
    /// Taxpayer RIF (`riva_rif`).
    pub rif: String,
    /// Certificate number (`riva_nrocom`).
    pub nro_comprobante: String,
    /// Invoice number (`riva_nrofac`).
    pub nro_factura: String,
}

impl fmt::Display for RivaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.rif, self.nro_comprobante, self.nro_factura)
    }
}

/// A row of `dp_islr`.
#[derive(Debug, Clone, PartialEq)]
pub struct IslrRecord {
    /// Natural key.
    pub key: IslrKey,
    /// `islr_nroctr`
    pub nro_control: Option<String>,
    /// `islr_fecemi`
    pub fecha_emision: Option<String>,
    /// `islr_bimp`
    pub base_imponible: f64,
    /// `islr_impret`
    pub monto_retenido: f64,
    /// `islr_nombre`
    pub nombre: Option<String>,
    /// `islr_direcc`
    pub direccion: Option<String>,
}

/// A row of `dp_riva`.
#[derive(Debug, Clone, PartialEq)]
pub struct RivaRecord {
    /// Natural key.
    pub key: RivaKey,
    /// `riva_nroctr`
    pub nro_control: Option<String>,
    /// `riva_fecdoc`
    pub fecha_documento: Option<String>,
    /// `riva_bimp`
    pub base_imponible: f64,
    /// `riva_iiva`
    pub monto_iva: f64,
    /// `riva_iret`
    pub monto_retenido: f64,
    /// `riva_nombre`
    pub nombre: Option<String>,
    /// `riva_direcc`
    pub direccion: Option<String>,
}

/// One row of the merged listing, tagged by `type`.
///
/// Amounts that could not be read as numbers are `NaN` and serialize as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum UnifiedRow {
    /// Row from `dp_islr`.
    #[serde(rename = "ISLR")]
    Islr(IslrRow),
    /// Row from `dp_riva`.
    #[serde(rename = "IVA")]
    Iva(IvaRow),
}

impl UnifiedRow {
    /// Withheld amount, regardless of type.
    pub fn monto_retenido(&self) -> f64 {
        match self {
            UnifiedRow::Islr(row) => row.monto_retenido,
            UnifiedRow::Iva(row) => row.monto_retenido,
        }
    }

    /// Returns the row's RIF.
    pub fn rif(&self) -> &str {
        match self {
            UnifiedRow::Islr(row) => &row.rif,
            UnifiedRow::Iva(row) => &row.rif,
        }
    }
}

/// ISLR projection of the unified row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IslrRow {
    /// Taxpayer RIF.
    pub rif: String,
    /// Invoice number.
    pub nro_factura: String,
    /// Withholding number, shown as the certificate number.
    pub nro_comprobante: String,
    /// Control number.
    pub nro_control: Option<String>,
    /// Issue date as stored.
    pub fecha_documento: Option<String>,
    /// Taxable base.
    pub base_imponible: f64,
    /// Withheld amount.
    pub monto_retenido: f64,
    /// Key part echoed back for export links.
    pub original_islr_rif: String,
    /// Key part echoed back for export links.
    pub original_islr_nrofac: String,
    /// Key part echoed back for export links.
    pub original_islr_nroret: String,
}

/// IVA projection of the unified row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IvaRow {
    /// Taxpayer RIF.
    pub rif: String,
    /// Invoice number.
    pub nro_factura: String,
    /// Certificate number.
    pub nro_comprobante: String,
    /// Control number.
    pub nro_control: Option<String>,
    /// Document date as stored.
    pub fecha_documento: Option<String>,
    /// Taxable base.
    pub base_imponible: f64,
    /// VAT amount.
    pub monto_iva: f64,
    /// Withheld VAT.
    pub monto_retenido: f64,
    /// Key part echoed back for export links.
    pub original_riva_rif: String,
    /// Key part echoed back for export links.
    pub original_riva_nrocom: String,
    /// Key part echoed back for export links.
    pub original_riva_nrofac: String,
}

impl From<IslrRecord> for UnifiedRow {
    fn from(record: IslrRecord) -> Self {
        let IslrKey {
            rif,
            nro_factura,
            nro_retencion,
        } = record.key;
        UnifiedRow::Islr(IslrRow {
            original_islr_rif: rif.clone(),
            original_islr_nrofac: nro_factura.clone(),
            original_islr_nroret: nro_retencion.clone(),
            rif,
            nro_factura,
            nro_comprobante: nro_retencion,
            nro_control: record.nro_control,
            fecha_documento: record.fecha_emision,
            base_imponible: record.base_imponible,
            monto_retenido: record.monto_retenido,
        })
    }
}

impl From<RivaRecord> for UnifiedRow {
    fn from(record: RivaRecord) -> Self {
        let RivaKey {
            rif,
            nro_comprobante,
            nro_factura,
        } = record.key;
        UnifiedRow::Iva(IvaRow {
            original_riva_rif: rif.clone(),
            original_riva_nrocom: nro_comprobante.clone(),
            original_riva_nrofac: nro_factura.clone(),
            rif,
            nro_factura,
            nro_comprobante,
            nro_control: record.nro_control,
            fecha_documento: record.fecha_documento,
            base_imponible: record.base_imponible,
            monto_iva: record.monto_iva,
            monto_retenido: record.monto_retenido,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn islr() -> IslrRecord {
        IslrRecord {
            key: IslrKey {
                rif: "J-123".to_string(),
                nro_factura: "F-1".to_string(),
                nro_retencion: "R-9".to_string(),
            },
            nro_control: Some("00-01".to_string()),
            fecha_emision: Some("2024-03-01".to_string()),
            base_imponible: 100.0,
            monto_retenido: 3.0,
            nombre: Some("Proveedor C.A.".to_string()),
            direccion: None,
        }
    }

    #[test]
    fn test_islr_row_shape() {
        let row = UnifiedRow::from(islr());
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "ISLR",
                "rif": "J-123",
                "nro_factura": "F-1",
                "nro_comprobante": "R-9",
                "nro_control": "00-01",
                "fecha_documento": "2024-03-01",
                "base_imponible": 100.0,
                "monto_retenido": 3.0,
                "original_islr_rif": "J-123",
                "original_islr_nrofac": "F-1",
                "original_islr_nroret": "R-9"
            })
        );
    }

    #[test]
    fn test_iva_row_swaps_key_roles() {
        let record = RivaRecord {
            key: RivaKey {
                rif: "V-7".to_string(),
                nro_comprobante: "C-2".to_string(),
                nro_factura: "F-8".to_string(),
            },
            nro_control: None,
            fecha_documento: None,
            base_imponible: 50.0,
            monto_iva: 8.0,
            monto_retenido: 6.0,
            nombre: None,
            direccion: None,
        };
        let value = serde_json::to_value(UnifiedRow::from(record)).unwrap();
        assert_eq!(value["type"], "IVA");
        assert_eq!(value["nro_factura"], "F-8");
        assert_eq!(value["nro_comprobante"], "C-2");
        assert_eq!(value["monto_iva"], 8.0);
        assert_eq!(value["original_riva_nrocom"], "C-2");
        assert_eq!(value["original_riva_nrofac"], "F-8");
    }

    #[test]
    fn test_nan_amount_serializes_as_null() {
        let mut record = islr();
        record.base_imponible = f64::NAN;
        let text = serde_json::to_string(&UnifiedRow::from(record)).unwrap();
        assert!(text.contains("\"base_imponible\":null"));
    }
}
