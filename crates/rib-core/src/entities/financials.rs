use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Raw balance-sheet extract of one tax-report filing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaxReportExtract {
    /// Taxpayer RUC.
    pub taxpayer_id: String,
    pub year: i32,
    pub company_name: Option<String>,
    pub receivables_operating: Option<f64>,
    pub total_assets: Option<f64>,
    pub payables_operating: Option<f64>,
    pub equity_paid_capital: Option<f64>,
    pub total_equity: Option<f64>,
}

/// One fiscal year's balance-sheet figures with derived totals and warnings.
///
/// Derived fields are pure functions of the source fields of the same year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FiscalYearFinancials {
    pub year: i32,
    pub receivables_operating: Option<f64>,
    pub total_assets: Option<f64>,
    pub payables_operating: Option<f64>,
    pub equity_paid_capital: Option<f64>,
    pub total_equity: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub total_liabilities_and_equity: Option<f64>,
    pub warnings: Vec<String>,
}

impl FiscalYearFinancials {
    /// Skeleton for a year without a filing: every amount `None`, no warnings.
    #[must_use]
    pub const fn empty(year: i32) -> Self {
        Self {
            year,
            receivables_operating: None,
            total_assets: None,
            payables_operating: None,
            equity_paid_capital: None,
            total_equity: None,
            total_liabilities: None,
            total_liabilities_and_equity: None,
            warnings: Vec::new(),
        }
    }

    /// Derive totals for `year` from its filing and validate the accounting
    /// identity `assets = liabilities + equity` within `tolerance`.
    ///
    /// Inconsistencies become warnings on the returned year, never errors.
    #[must_use]
    pub fn derive(year: i32, source: Option<&TaxReportExtract>, tolerance: f64) -> Self {
        let Some(source) = source else {
            return Self::empty(year);
        };

        let mut financials = Self {
            receivables_operating: source.receivables_operating,
            total_assets: source.total_assets,
            payables_operating: source.payables_operating,
            equity_paid_capital: source.equity_paid_capital,
            total_equity: source.total_equity,
            ..Self::empty(year)
        };

        if let (Some(assets), Some(equity)) = (financials.total_assets, financials.total_equity) {
            let liabilities = assets - equity;
            financials.total_liabilities = Some(liabilities);
            if liabilities < 0.0 {
                financials.warnings.push(format!(
                    "{year}: total liabilities are negative ({liabilities:.2}); total equity exceeds total assets"
                ));
            }
        }

        if let (Some(liabilities), Some(equity)) =
            (financials.total_liabilities, financials.total_equity)
        {
            financials.total_liabilities_and_equity = Some(liabilities + equity);
        }

        if let (Some(sum), Some(assets)) =
            (financials.total_liabilities_and_equity, financials.total_assets)
        {
            let difference = (sum - assets).abs();
            if difference > tolerance {
                financials.warnings.push(format!(
                    "{year}: total liabilities plus equity differ from total assets by {difference:.2}"
                ));
            }
        }

        financials
    }

    /// Whether the year had any source figure at all.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.receivables_operating.is_some()
            || self.total_assets.is_some()
            || self.payables_operating.is_some()
            || self.equity_paid_capital.is_some()
            || self.total_equity.is_some()
    }
}

/// A taxpayer's financials across every tracked year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FinancialReconciliationResult {
    pub taxpayer_id: String,
    /// Name from the first tracked year whose filing carries one.
    pub taxpayer_name: Option<String>,
    pub years: Vec<FiscalYearFinancials>,
    /// Cross-cutting issues, such as a year whose fetch failed.
    pub global_warnings: Vec<String>,
}

impl FinancialReconciliationResult {
    /// All warnings, global first, then per year in year order.
    #[must_use]
    pub fn all_warnings(&self) -> Vec<&str> {
        self.global_warnings
            .iter()
            .chain(self.years.iter().flat_map(|year| year.warnings.iter()))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn year(&self, year: i32) -> Option<&FiscalYearFinancials> {
        self.years.iter().find(|y| y.year == year)
    }
}
