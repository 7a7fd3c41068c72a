//! Financial reconciliation settings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_years() -> Vec<i32> {
    vec![2022, 2023, 2024]
}

/// Allowed gap between `assets` and `liabilities + equity`, in currency units.
const fn default_tolerance() -> f64 {
    1.0
}

fn default_tax_report_table() -> String {
    String::from("reporte_tributario")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReconcileConfig {
    /// Fiscal years reconciled for each taxpayer, in output order.
    #[serde(default = "default_years")]
    pub years: Vec<i32>,

    /// Tolerance of the accounting identity check.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Table with one balance-sheet extract per `(ruc, anio)`.
    #[serde(default = "default_tax_report_table")]
    pub tax_report_table: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            years: default_years(),
            tolerance: default_tolerance(),
            tax_report_table: default_tax_report_table(),
        }
    }
}

impl ReconcileConfig {
    /// Reject settings the reconciliation engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty or duplicated year
    /// list, or a negative / non-finite tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reconcile.years".into(),
                reason: "at least one fiscal year is required".into(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.years.iter().find(|year| !seen.insert(**year)) {
            return Err(ConfigError::InvalidValue {
                field: "reconcile.years".into(),
                reason: format!("year {dup} is listed more than once"),
            });
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "reconcile.tolerance".into(),
                reason: format!("must be a finite, non-negative number (got {})", self.tolerance),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_track_three_years() {
        let config = ReconcileConfig::default();
        assert_eq!(config.years, vec![2022, 2023, 2024]);
        assert!((config.tolerance - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.tax_report_table, "reporte_tributario");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn arbitrary_years_are_valid() {
        let config = ReconcileConfig {
            years: vec![2019, 2025],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_years_rejected() {
        let config = ReconcileConfig {
            years: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn duplicate_years_rejected() {
        let config = ReconcileConfig {
            years: vec![2023, 2024, 2023],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("2023"));
    }

    #[test]
    fn negative_tolerance_rejected() {
        let config = ReconcileConfig {
            tolerance: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
