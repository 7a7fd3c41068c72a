//! Entity structs for the RIB back-office domain.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so they can
//! be emitted by the CLI and validated against generated schemas.

mod audit;
mod financials;
mod sales;

pub use audit::{AuditLogEntry, AuditLogWithActorName, ChangeStats, EntityId};
pub use financials::{FinancialReconciliationResult, FiscalYearFinancials, TaxReportExtract};
pub use sales::{MonthlySales, YearlySales, aggregate_sales_by_year};
