use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One month of declared sales for a taxpayer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MonthlySales {
    pub taxpayer_id: String,
    pub year: i32,
    /// 1-12.
    pub month: u8,
    pub amount: Option<f64>,
}

/// Sales totals for one calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct YearlySales {
    pub year: i32,
    pub total: f64,
    /// Distinct months with a non-null amount.
    pub months_reported: usize,
}

/// Group monthly sales by year (ascending), summing non-null amounts.
///
/// Years whose months are all null still appear with a zero total.
#[must_use]
pub fn aggregate_sales_by_year(records: &[MonthlySales]) -> Vec<YearlySales> {
    let mut by_year: BTreeMap<i32, (f64, BTreeSet<u8>)> = BTreeMap::new();
    for record in records {
        let (total, months) = by_year.entry(record.year).or_default();
        if let Some(amount) = record.amount {
            *total += amount;
            months.insert(record.month);
        }
    }

    by_year
        .into_iter()
        .map(|(year, (total, months))| YearlySales {
            year,
            total,
            months_reported: months.len(),
        })
        .collect()
}
