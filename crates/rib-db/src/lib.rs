//! # rib-db
//!
//! Data access for the RIB back office.
//!
//! Everything is a read against the hosted backend's REST interface:
//! per-kind audit ledgers enriched with actor names, change statistics,
//! tax-report reconciliation and monthly sales. Repositories are generic over
//! [`RemoteStore`]; [`RestClient`] talks PostgREST, [`InMemoryStore`] serves
//! tests and fixtures.
//!
//! Failure policy: listing reads propagate `DatabaseError`. Actor names,
//! last-change lookups, change statistics and per-year reconciliation fetches
//! degrade to empty values or warnings and are logged with `tracing`.

pub mod descriptor;
pub mod error;
pub mod helpers;
pub mod memory;
pub mod query;
pub mod repos;
pub mod rest;
pub mod retry;
pub mod service;
pub mod store;
mod test_support;

pub use descriptor::{AuditTable, OwnerJoin, audit_table};
pub use error::DatabaseError;
pub use memory::InMemoryStore;
pub use query::{Filter, Order, SelectQuery};
pub use repos::audit::AuditFilter;
pub use rest::RestClient;
pub use retry::RetryConfig;
pub use service::{ProfileLookup, RibService};
pub use store::RemoteStore;
