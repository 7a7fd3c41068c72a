//! In-process [`RemoteStore`] backed by JSON rows.
//!
//! Evaluates the same [`SelectQuery`] values the REST client sends, so
//! repositories can be exercised without a backend. Failures can be injected
//! per table or per `(table, column, value)` to drive the degradation paths,
//! and every table read is counted so batching can be asserted.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::query::{Filter, SelectQuery};
use crate::store::{RemoteStore, single_row};

#[derive(Debug, Clone)]
struct FailureRule {
    table: String,
    matcher: Option<(String, String)>,
    message: String,
}

impl FailureRule {
    fn applies_to(&self, query: &SelectQuery) -> bool {
        if self.table != query.table {
            return false;
        }
        let Some((column, value)) = &self.matcher else {
            return true;
        };
        query.filters.iter().any(|filter| match filter {
            Filter::Eq { column: c, value: v } => c == column && v == value,
            Filter::In { column: c, values } => c == column && values.contains(value),
        })
    }
}

/// Rows, RPC results and injected failures, all in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: HashMap<String, Vec<Value>>,
    rpcs: HashMap<String, Value>,
    failures: Vec<FailureRule>,
    calls: Mutex<HashMap<String, usize>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to `table`, creating it if needed.
    #[must_use]
    pub fn with_rows(mut self, table: &str, rows: impl IntoIterator<Item = Value>) -> Self {
        self.tables.entry(table.to_string()).or_default().extend(rows);
        self
    }

    /// Register the result returned by `rpc(function, _)`.
    #[must_use]
    pub fn with_rpc(mut self, function: &str, result: Value) -> Self {
        self.rpcs.insert(function.to_string(), result);
        self
    }

    /// Every read of `table` fails with `message`.
    #[must_use]
    pub fn fail_table(mut self, table: &str, message: &str) -> Self {
        self.failures.push(FailureRule {
            table: table.to_string(),
            matcher: None,
            message: message.to_string(),
        });
        self
    }

    /// Reads of `table` filtering `column` on `value` fail with `message`.
    #[must_use]
    pub fn fail_when(mut self, table: &str, column: &str, value: &str, message: &str) -> Self {
        self.failures.push(FailureRule {
            table: table.to_string(),
            matcher: Some((column.to_string(), value.to_string())),
            message: message.to_string(),
        });
        self
    }

    /// Number of reads issued against `table` (or `rpc:{name}`) so far.
    #[must_use]
    pub fn calls(&self, table: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .copied()
            .unwrap_or(0)
    }

    fn record_call(&self, key: &str) {
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        *calls.entry(key.to_string()).or_default() += 1;
    }

    fn check_failures(&self, query: &SelectQuery) -> Result<(), DatabaseError> {
        match self.failures.iter().find(|rule| rule.applies_to(query)) {
            Some(rule) => Err(DatabaseError::Query(rule.message.clone())),
            None => Ok(()),
        }
    }

    fn evaluate(&self, query: &SelectQuery) -> Vec<Value> {
        let mut rows: Vec<Value> = self
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches_filter(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_json(a.get(&order.column), b.get(&order.column));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        rows
    }

    fn run(&self, query: &SelectQuery) -> Result<Vec<Value>, DatabaseError> {
        self.record_call(&query.table);
        self.check_failures(query)?;
        Ok(self.evaluate(query))
    }
}

impl RemoteStore for InMemoryStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, DatabaseError> {
        self.run(query)
    }

    async fn select_single(&self, query: &SelectQuery) -> Result<Option<Value>, DatabaseError> {
        let rows = self.run(query)?;
        single_row(rows, query)
    }

    async fn rpc(&self, function: &str, _args: &Value) -> Result<Value, DatabaseError> {
        self.record_call(&format!("rpc:{function}"));
        self.rpcs
            .get(function)
            .cloned()
            .ok_or_else(|| DatabaseError::Api {
                status: 404,
                code: Some(String::from("PGRST202")),
                message: format!("Could not find the function {function}"),
            })
    }
}

/// Text form of a scalar cell, the way filter values travel on the wire.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches_filter(row: &Value, filter: &Filter) -> bool {
    let Some(cell) = row.get(filter.column()).and_then(cell_text) else {
        return false;
    };
    match filter {
        Filter::Eq { value, .. } => cell == *value,
        Filter::In { values, .. } => values.contains(&cell),
    }
}

/// Nulls and missing cells sort first. Numbers compare numerically and
/// timestamps chronologically, whatever their offset or layout; other strings
/// compare lexically.
fn compare_json(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (parse_datetime(x), parse_datetime(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(x), Some(y)) => cell_text(x).cmp(&cell_text(y)),
    }
}
