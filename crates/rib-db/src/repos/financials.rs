//! Tax-report reads and balance-sheet reconciliation.

use futures::future::join_all;
use serde_json::Value;

use rib_core::entities::{FinancialReconciliationResult, FiscalYearFinancials, TaxReportExtract};

use crate::error::DatabaseError;
use crate::helpers::{get_i64, get_opt_f64, get_opt_string, get_string};
use crate::query::SelectQuery;
use crate::service::RibService;
use crate::store::RemoteStore;

/// Tax-report columns.
mod columns {
    pub const RUC: &str = "ruc";
    pub const YEAR: &str = "anio";
    pub const COMPANY_NAME: &str = "razon_social";
    pub const RECEIVABLES_OPERATING: &str = "cuentas_por_cobrar_giro";
    pub const TOTAL_ASSETS: &str = "total_activos";
    pub const PAYABLES_OPERATING: &str = "cuentas_por_pagar_giro";
    pub const EQUITY_PAID_CAPITAL: &str = "capital_pagado";
    pub const TOTAL_EQUITY: &str = "total_patrimonio";
}

impl<S: RemoteStore> RibService<S> {
    /// Fetch one year's tax-report extract. `None` if there is no filing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the fetch fails or the row cannot be decoded.
    pub async fn tax_report(
        &self,
        taxpayer_id: &str,
        year: i32,
    ) -> Result<Option<TaxReportExtract>, DatabaseError> {
        let query = SelectQuery::new(&self.reconcile_config().tax_report_table)
            .eq(columns::RUC, taxpayer_id)
            .eq(columns::YEAR, year);
        tracing::debug!(%query, "fetching tax report");
        self.store()
            .select_single(&query)
            .await?
            .map(|row| decode_tax_report(&row))
            .transpose()
    }

    /// Reconcile a taxpayer's balance sheets over the configured years.
    pub async fn reconcile(&self, taxpayer_id: &str) -> FinancialReconciliationResult {
        self.reconcile_years(taxpayer_id, &self.reconcile_config().years)
            .await
    }

    /// Reconcile a taxpayer's balance sheets over `years`.
    ///
    /// Years are fetched concurrently and returned in the given order. A
    /// missing filing is an empty year; a failed fetch becomes a global
    /// warning and an empty year. This never fails as a whole.
    pub async fn reconcile_years(
        &self,
        taxpayer_id: &str,
        years: &[i32],
    ) -> FinancialReconciliationResult {
        let tolerance = self.reconcile_config().tolerance;
        let fetches = years
            .iter()
            .map(|&year| async move { (year, self.tax_report(taxpayer_id, year).await) });
        let fetched = join_all(fetches).await;

        let mut taxpayer_name = None;
        let mut global_warnings = Vec::new();
        let mut financials = Vec::with_capacity(fetched.len());

        for (year, result) in fetched {
            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!(taxpayer_id, year, error = %e, "tax report fetch failed");
                    global_warnings.push(format!("failed to fetch {year} financials: {e}"));
                    None
                }
            };
            if taxpayer_name.is_none() {
                taxpayer_name = report.as_ref().and_then(|r| r.company_name.clone());
            }
            financials.push(FiscalYearFinancials::derive(year, report.as_ref(), tolerance));
        }

        FinancialReconciliationResult {
            taxpayer_id: taxpayer_id.to_string(),
            taxpayer_name,
            years: financials,
            global_warnings,
        }
    }
}

fn decode_tax_report(row: &Value) -> Result<TaxReportExtract, DatabaseError> {
    let year = get_i64(row, columns::YEAR)?;
    Ok(TaxReportExtract {
        taxpayer_id: get_string(row, columns::RUC)?,
        year: i32::try_from(year)
            .map_err(|_| DatabaseError::Decode(format!("year {year} out of range")))?,
        company_name: get_opt_string(row, columns::COMPANY_NAME)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
        receivables_operating: get_opt_f64(row, columns::RECEIVABLES_OPERATING)?,
        total_assets: get_opt_f64(row, columns::TOTAL_ASSETS)?,
        payables_operating: get_opt_f64(row, columns::PAYABLES_OPERATING)?,
        equity_paid_capital: get_opt_f64(row, columns::EQUITY_PAID_CAPITAL)?,
        total_equity: get_opt_f64(row, columns::TOTAL_EQUITY)?,
    })
}
