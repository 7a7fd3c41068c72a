//! Monthly sales reads.

use serde_json::Value;

use rib_core::entities::{MonthlySales, YearlySales, aggregate_sales_by_year};

use crate::error::DatabaseError;
use crate::helpers::{get_i64, get_opt_f64, get_string};
use crate::query::SelectQuery;
use crate::service::RibService;
use crate::store::RemoteStore;

const SALES_TABLE: &str = "ventas_mensuales";

mod columns {
    pub const RUC: &str = "ruc";
    pub const YEAR: &str = "anio";
    pub const MONTH: &str = "mes";
    pub const AMOUNT: &str = "monto";
}

impl<S: RemoteStore> RibService<S> {
    /// Every declared month for a taxpayer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the fetch fails or a row cannot be decoded.
    pub async fn monthly_sales(
        &self,
        taxpayer_id: &str,
    ) -> Result<Vec<MonthlySales>, DatabaseError> {
        let query = SelectQuery::new(SALES_TABLE)
            .eq(columns::RUC, taxpayer_id)
            .order_asc(columns::YEAR);
        tracing::debug!(%query, "fetching monthly sales");
        let mut sales = self
            .store()
            .select(&query)
            .await?
            .iter()
            .map(decode_monthly_sales)
            .collect::<Result<Vec<_>, _>>()?;
        sales.sort_by_key(|s| (s.year, s.month));
        Ok(sales)
    }

    /// Declared sales totals per year, ascending.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the monthly sales cannot be read.
    pub async fn sales_by_year(
        &self,
        taxpayer_id: &str,
    ) -> Result<Vec<YearlySales>, DatabaseError> {
        let monthly = self.monthly_sales(taxpayer_id).await?;
        Ok(aggregate_sales_by_year(&monthly))
    }
}

fn decode_monthly_sales(row: &Value) -> Result<MonthlySales, DatabaseError> {
    let year = get_i64(row, columns::YEAR)?;
    let month = get_i64(row, columns::MONTH)?;
    Ok(MonthlySales {
        taxpayer_id: get_string(row, columns::RUC)?,
        year: i32::try_from(year)
            .map_err(|_| DatabaseError::Decode(format!("year {year} out of range")))?,
        month: u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| DatabaseError::Decode(format!("month {month} out of range")))?,
        amount: get_opt_f64(row, columns::AMOUNT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn month(year: i32, month: u8, amount: Option<f64>) -> Value {
        json!({"ruc": "20100070970", "anio": year, "mes": month, "monto": amount})
    }

    #[tokio::test]
    async fn aggregates_per_year() {
        let svc = test_service(InMemoryStore::new().with_rows(
            SALES_TABLE,
            [
                month(2024, 2, Some(200.0)),
                month(2023, 12, Some(50.0)),
                month(2024, 1, Some(100.0)),
                month(2024, 3, None),
                json!({"ruc": "20999999999", "anio": 2024, "mes": 1, "monto": 9999}),
            ],
        ));

        let yearly = svc.sales_by_year("20100070970").await.unwrap();
        assert_eq!(
            yearly,
            vec![
                YearlySales {
                    year: 2023,
                    total: 50.0,
                    months_reported: 1,
                },
                YearlySales {
                    year: 2024,
                    total: 300.0,
                    months_reported: 2,
                },
            ]
        );
    }

    #[tokio::test]
    async fn rejects_out_of_range_month() {
        let svc =
            test_service(InMemoryStore::new().with_rows(SALES_TABLE, [month(2024, 13, None)]));
        assert!(matches!(
            svc.monthly_sales("20100070970").await,
            Err(DatabaseError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let svc = test_service(InMemoryStore::new().fail_table(SALES_TABLE, "timeout"));
        assert!(svc.sales_by_year("20100070970").await.is_err());
    }
}
