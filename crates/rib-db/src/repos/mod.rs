//! Read operations for the RIB back office.
//!
//! Each module adds methods to `RibService` via `impl RibService` blocks.

pub mod audit;
pub mod financials;
pub mod profiles;
pub mod sales;
pub mod summary;
