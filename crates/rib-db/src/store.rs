//! The remote query client seam.
//!
//! Every repository method talks to the hosted backend through
//! [`RemoteStore`]. Production code uses [`crate::rest::RestClient`]; tests and
//! fixtures use [`crate::memory::InMemoryStore`].

use std::future::Future;

use serde_json::Value;

use crate::error::DatabaseError;
use crate::query::SelectQuery;

/// Generic read access to a relational store that returns JSON rows.
pub trait RemoteStore: Send + Sync {
    /// Fetch every row matching `query`.
    fn select(
        &self,
        query: &SelectQuery,
    ) -> impl Future<Output = Result<Vec<Value>, DatabaseError>> + Send;

    /// Fetch at most one row. Zero rows, or a store-specific "not found"
    /// signal, is `Ok(None)`; only genuine failures are errors.
    fn select_single(
        &self,
        query: &SelectQuery,
    ) -> impl Future<Output = Result<Option<Value>, DatabaseError>> + Send;

    /// Call a server-side procedure with JSON arguments.
    fn rpc(
        &self,
        function: &str,
        args: &Value,
    ) -> impl Future<Output = Result<Value, DatabaseError>> + Send;
}

/// Collapse a multi-row result into the single-row contract.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if more than one row matched.
pub fn single_row(rows: Vec<Value>, query: &SelectQuery) -> Result<Option<Value>, DatabaseError> {
    let mut rows = rows.into_iter();
    let first = rows.next();
    if rows.next().is_some() {
        return Err(DatabaseError::Query(format!(
            "expected at most one row from {query}"
        )));
    }
    Ok(first)
}
