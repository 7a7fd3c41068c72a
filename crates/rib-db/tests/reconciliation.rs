//! Balance-sheet reconciliation against an in-memory tax-report table.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use rib_config::RibConfig;
use rib_core::entities::FiscalYearFinancials;
use rib_db::{InMemoryStore, RibService};

const RUC: &str = "20100070970";

fn service(store: InMemoryStore) -> RibService<InMemoryStore> {
    RibService::new(store, &RibConfig::default())
}

fn filing(year: i32, name: Option<&str>, assets: f64, equity: f64) -> Value {
    json!({
        "ruc": RUC,
        "anio": year,
        "razon_social": name,
        "cuentas_por_cobrar_giro": 120.0,
        "total_activos": assets,
        "cuentas_por_pagar_giro": 80.0,
        "capital_pagado": 300.0,
        "total_patrimonio": equity,
    })
}

#[tokio::test]
async fn balanced_year_has_no_warnings() {
    let svc = service(InMemoryStore::new().with_rows(
        "reporte_tributario",
        [filing(2023, Some("Textiles Andinos SAC"), 1000.0, 400.0)],
    ));
    let result = svc.reconcile(RUC).await;

    let year = result.year(2023).unwrap();
    assert_eq!(year.total_liabilities, Some(600.0));
    assert_eq!(year.total_liabilities_and_equity, Some(1000.0));
    assert!(year.warnings.is_empty());
    assert!(result.global_warnings.is_empty());
    assert_eq!(result.taxpayer_name.as_deref(), Some("Textiles Andinos SAC"));
}

#[tokio::test]
async fn negative_liabilities_warn_once() {
    let svc = service(
        InMemoryStore::new().with_rows("reporte_tributario", [filing(2024, None, 1000.0, 1200.0)]),
    );
    let result = svc.reconcile(RUC).await;

    let year = result.year(2024).unwrap();
    assert_eq!(year.total_liabilities, Some(-200.0));
    assert_eq!(year.total_liabilities_and_equity, Some(1000.0));
    assert_eq!(year.warnings.len(), 1);
    assert!(year.warnings[0].contains("negative"));
}

#[tokio::test]
async fn no_filings_gives_empty_skeletons() {
    let svc = service(InMemoryStore::new());
    let result = svc.reconcile(RUC).await;

    assert_eq!(result.taxpayer_id, RUC);
    assert_eq!(result.taxpayer_name, None);
    assert_eq!(
        result.years,
        vec![
            FiscalYearFinancials::empty(2022),
            FiscalYearFinancials::empty(2023),
            FiscalYearFinancials::empty(2024),
        ]
    );
    assert!(result.global_warnings.is_empty());
    assert!(result.all_warnings().is_empty());
}

#[tokio::test]
async fn one_failed_year_does_not_abort_the_rest() {
    let store = InMemoryStore::new()
        .with_rows(
            "reporte_tributario",
            [
                filing(2022, Some("Textiles Andinos SAC"), 800.0, 300.0),
                filing(2023, Some("Textiles Andinos SAC"), 900.0, 350.0),
                filing(2024, Some("Textiles Andinos SAC"), 1000.0, 400.0),
            ],
        )
        .fail_when("reporte_tributario", "anio", "2023", "statement timeout");
    let result = service(store).reconcile(RUC).await;

    assert_eq!(result.global_warnings.len(), 1);
    assert!(result.global_warnings[0].contains("2023"));
    assert!(result.global_warnings[0].contains("statement timeout"));

    assert_eq!(result.year(2023), Some(&FiscalYearFinancials::empty(2023)));
    for year in [2022, 2024] {
        let data = result.year(year).unwrap();
        assert!(data.has_data());
        assert!(data.total_liabilities.is_some());
        assert_eq!(data.total_liabilities_and_equity, data.total_assets);
        assert!(data.warnings.is_empty());
    }
}

#[tokio::test]
async fn years_are_independent() {
    let svc = service(
        InMemoryStore::new().with_rows("reporte_tributario", [filing(2023, None, 500.0, 200.0)]),
    );
    let result = svc.reconcile(RUC).await;

    assert_eq!(result.year(2022), Some(&FiscalYearFinancials::empty(2022)));
    assert_eq!(result.year(2024), Some(&FiscalYearFinancials::empty(2024)));
    assert_eq!(result.year(2023).unwrap().total_liabilities, Some(300.0));
}

#[tokio::test]
async fn first_named_year_wins() {
    let store = InMemoryStore::new().with_rows(
        "reporte_tributario",
        [
            filing(2022, None, 100.0, 50.0),
            filing(2023, Some("Andinos SAC"), 100.0, 50.0),
            filing(2024, Some("Textiles Andinos SAC"), 100.0, 50.0),
        ],
    );
    let result = service(store).reconcile(RUC).await;
    assert_eq!(result.taxpayer_name.as_deref(), Some("Andinos SAC"));
}

#[tokio::test]
async fn every_configured_year_is_fetched_once() {
    let svc = service(InMemoryStore::new());
    let _ = svc.reconcile(RUC).await;
    assert_eq!(svc.store().calls("reporte_tributario"), 3);
}
