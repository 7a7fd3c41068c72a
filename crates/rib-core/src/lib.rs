//! # rib-core
//!
//! Core types and pure derivations for the RIB credit-risk back office.
//!
//! This crate provides the foundational types shared across all RIB crates:
//! - Audit ledger entries, actor-enriched views and change statistics
//! - Fiscal-year balance-sheet figures and the reconciliation derivation
//! - Monthly sales and the sales-by-year aggregation
//! - Audit actions and tracked entity kinds
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
