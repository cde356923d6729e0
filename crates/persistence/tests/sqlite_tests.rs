//! SQLite backend integration tests.
//!
//! These run against a file database so that every pooled connection sees
//! the same data.

use retenciones_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};
use retenciones_persistence::core::{RetentionStore, UserStore, list_retentions};
use retenciones_persistence::types::{
    DEFAULT_LIMIT, IslrKey, IslrRecord, ListingQuery, NewUser, RawListingParams, RivaKey, RivaRecord,
    SortDirection, SortKey, TypeFilter, UnifiedRow,
};

fn create_backend(dir: &tempfile::TempDir) -> SqliteBackend {
    let config = SqliteBackendConfig {
        max_connections: 4,
        ..Default::default()
    };
    let backend = SqliteBackend::with_config(dir.path().join("retenciones.db"), config)
        .expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

fn islr(nrofac: &str, fecemi: &str, retenido: f64) -> IslrRecord {
    IslrRecord {
        key: IslrKey {
            rif: "J-30000000-1".to_string(),
            nro_factura: nrofac.to_string(),
            nro_retencion: format!("R{nrofac}"),
        },
        nro_control: None,
        fecha_emision: Some(fecemi.to_string()),
        base_imponible: retenido * 50.0,
        monto_retenido: retenido,
        nombre: Some("Distribuidora Andina".to_string()),
        direccion: Some("Mérida".to_string()),
    }
}

fn riva(nrocom: &str, fecdoc: &str) -> RivaRecord {
    RivaRecord {
        key: RivaKey {
            rif: "V-12345678-9".to_string(),
            nro_comprobante: nrocom.to_string(),
            nro_factura: format!("F{nrocom}"),
        },
        nro_control: Some("00-1".to_string()),
        fecha_documento: Some(fecdoc.to_string()),
        base_imponible: 1000.0,
        monto_iva: 160.0,
        monto_retenido: 120.0,
        nombre: None,
        direccion: None,
    }
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_default_sort_is_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let backend = create_backend(&dir);
    backend.insert_islr(&islr("1", "2024-01-10", 1.0)).unwrap();
    backend.insert_islr(&islr("2", "2024-03-10", 1.0)).unwrap();
    backend.insert_islr(&islr("3", "2024-02-10", 1.0)).unwrap();

    let page = backend.list_islr(&ListingQuery::new()).await.unwrap();
    let dates: Vec<_> = page
        .rows
        .iter()
        .map(|r| r.fecha_emision.clone().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-10", "2024-02-10", "2024-01-10"]);
}

#[tokio::test]
async fn test_listing_from_raw_params() {
    let dir = tempfile::tempdir().unwrap();
    let backend = create_backend(&dir);
    for i in 0..20 {
        backend
            .insert_islr(&islr(&format!("{i:02}"), "2024-05-01", f64::from(i)))
            .unwrap();
        backend
            .insert_riva(&riva(&format!("{i:02}"), "2024-05-02"))
            .unwrap();
    }

    let raw = RawListingParams {
        page: Some("2".to_string()),
        ..Default::default()
    };
    let query = ListingQuery::from_raw(&raw, DEFAULT_LIMIT, 100).unwrap();
    let page = list_retentions(&backend, &query).await.unwrap();

    assert_eq!(page.total, 40);
    // 5 ISLR rows and 5 RIVA rows remain past offset 15.
    assert_eq!(page.data.len(), 10);
}

#[tokio::test]
async fn test_type_filter_restricts_rows() {
    let dir = tempfile::tempdir().unwrap();
    let backend = create_backend(&dir);
    backend.insert_islr(&islr("1", "2024-01-01", 3.0)).unwrap();
    backend.insert_riva(&riva("1", "2024-01-01")).unwrap();

    let query = ListingQuery::new().with_type_filter(TypeFilter::Iva);
    let page = list_retentions(&backend, &query).await.unwrap();
    assert_eq!(page.total, 1);
    assert!(matches!(page.data[0], UnifiedRow::Iva(_)));
}

#[tokio::test]
async fn test_sort_by_rif_descending() {
    let dir = tempfile::tempdir().unwrap();
    let backend = create_backend(&dir);
    backend.insert_riva(&riva("1", "2024-01-01")).unwrap();
    let mut other = riva("2", "2024-01-01");
    other.key.rif = "J-1".to_string();
    backend.insert_riva(&other).unwrap();

    let query = ListingQuery::new().with_sort(SortKey::Rif, SortDirection::Descending);
    let page = backend.list_riva(&query).await.unwrap();
    assert_eq!(page.rows[0].key.rif, "V-12345678-9");
    assert_eq!(page.rows[1].key.rif, "J-1");
}

// ============================================================================
// Lookup and Account Tests
// ============================================================================

#[tokio::test]
async fn test_lookup_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let backend = create_backend(&dir);
        backend.insert_riva(&riva("77", "2024-06-01")).unwrap();
    }

    let backend = create_backend(&dir);
    let record = backend
        .find_riva(&RivaKey {
            rif: "V-12345678-9".into(),
            nro_comprobante: "77".into(),
            nro_factura: "F77".into(),
        })
        .await
        .unwrap()
        .expect("record should persist");
    assert_eq!(record.monto_iva, 160.0);
}

#[tokio::test]
async fn test_user_registration_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let backend = create_backend(&dir);
    backend
        .create_user(NewUser {
            username: "contador".into(),
            rif: "J-30000000-1".into(),
            password_hash: "hash".into(),
        })
        .await
        .unwrap();

    assert!(backend.user_exists("contador", "J-0").await.unwrap());
    assert!(backend.user_exists("otro", "J-30000000-1").await.unwrap());
    assert!(!backend.user_exists("otro", "J-0").await.unwrap());
}
