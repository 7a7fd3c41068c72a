//! Row-to-entity parsing helpers.
//!
//! The REST API hands back rows as JSON objects. These helpers isolate the
//! column decoding every repo needs: nullable text, money amounts that may
//! arrive as numbers or numeric strings, the several timestamp layouts
//! Postgres emits, and identities that are numeric for some tables and text
//! for others.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use rib_core::entities::EntityId;

use crate::error::DatabaseError;

/// Parse a timestamp as `DateTime<Utc>`.
///
/// Handles RFC 3339 (`"2024-02-09T14:30:00.123456+00:00"`) and naive layouts
/// from `timestamp without time zone` columns (`"2024-02-09T14:30:00"`,
/// `"2024-02-09 14:30:00.5"`), which are taken as UTC.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if no layout matches.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DatabaseError::Decode(format!("Failed to parse datetime '{s}'")))
}

/// Parse a text value into a serde-deserializable enum.
///
/// Works with every rib-core enum that uses `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Decode(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a required column as text. Numbers are rendered as text.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the column is missing, null or not scalar.
pub fn get_string(row: &Value, column: &str) -> Result<String, DatabaseError> {
    match row.get(column) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(DatabaseError::Decode(format!(
            "column '{column}' is missing or not text"
        ))),
    }
}

/// Read a nullable text column. Returns `None` for null, missing and empty.
#[must_use]
pub fn get_opt_string(row: &Value, column: &str) -> Option<String> {
    match row.get(column) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a nullable money amount. Accepts JSON numbers and numeric strings.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` for a non-numeric string or a non-scalar value.
pub fn get_opt_f64(row: &Value, column: &str) -> Result<Option<f64>, DatabaseError> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|e| {
            DatabaseError::Decode(format!("column '{column}' is not numeric ('{s}'): {e}"))
        }),
        Some(other) => Err(DatabaseError::Decode(format!(
            "column '{column}' is not numeric: {other}"
        ))),
    }
}

/// Read a required integer column (numbers or numeric strings).
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the column is missing or not an `i64`.
pub fn get_i64(row: &Value, column: &str) -> Result<i64, DatabaseError> {
    match row.get(column) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| DatabaseError::Decode(format!("column '{column}' is not an integer")))
}

/// Read a record identity: JSON numbers become `Numeric`, strings `Text`.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the column is missing or not scalar.
pub fn get_entity_id(row: &Value, column: &str) -> Result<EntityId, DatabaseError> {
    match row.get(column) {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(EntityId::Numeric)
            .ok_or_else(|| {
                DatabaseError::Decode(format!("column '{column}' is not an integer id"))
            }),
        Some(Value::String(s)) => Ok(EntityId::Text(s.clone())),
        _ => Err(DatabaseError::Decode(format!(
            "column '{column}' is missing or not an id"
        ))),
    }
}

/// Read an optional JSON column, keeping its shape as-is.
#[must_use]
pub fn get_opt_json(row: &Value, column: &str) -> Option<Value> {
    row.get(column).filter(|v| !v.is_null()).cloned()
}

/// Read a `changed_fields` map. Non-boolean flags count as changed unless
/// they are `false` or null.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the column holds something other than
/// an object or null.
pub fn get_changed_fields(
    row: &Value,
    column: &str,
) -> Result<Option<BTreeMap<String, bool>>, DatabaseError> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(
            map.iter()
                .map(|(name, flag)| {
                    let changed = match flag {
                        Value::Bool(b) => *b,
                        Value::Null => false,
                        _ => true,
                    };
                    (name.clone(), changed)
                })
                .collect(),
        )),
        Some(other) => Err(DatabaseError::Decode(format!(
            "column '{column}' is not an object: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("2024-02-09T14:30:00+00:00")]
    #[case("2024-02-09T14:30:00Z")]
    #[case("2024-02-09T09:30:00-05:00")]
    #[case("2024-02-09T14:30:00")]
    #[case("2024-02-09 14:30:00")]
    fn parses_timestamp_layouts(#[case] raw: &str) {
        let dt = parse_datetime(raw).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-02-09T14:30:00+00:00");
    }

    #[test]
    fn parses_fractional_seconds() {
        let dt = parse_datetime("2024-02-09T14:30:00.123456+00:00").unwrap();
        assert_eq!(dt.timestamp_subsec_micros(), 123_456);
        assert!(parse_datetime("2024-02-09 14:30:00.5").is_ok());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Decode(_))
        ));
    }

    #[test]
    fn money_accepts_numbers_and_strings() {
        let row = json!({"a": 1500.25, "b": "320.10", "c": null, "d": "", "e": "n/a"});
        assert_eq!(get_opt_f64(&row, "a").unwrap(), Some(1500.25));
        assert_eq!(get_opt_f64(&row, "b").unwrap(), Some(320.10));
        assert_eq!(get_opt_f64(&row, "c").unwrap(), None);
        assert_eq!(get_opt_f64(&row, "d").unwrap(), None);
        assert_eq!(get_opt_f64(&row, "missing").unwrap(), None);
        assert!(get_opt_f64(&row, "e").is_err());
    }

    #[test]
    fn entity_ids_keep_their_type() {
        let row = json!({"n": 42, "t": "20100070970", "x": [1]});
        assert_eq!(get_entity_id(&row, "n").unwrap(), EntityId::Numeric(42));
        assert_eq!(
            get_entity_id(&row, "t").unwrap(),
            EntityId::Text("20100070970".into())
        );
        assert!(get_entity_id(&row, "x").is_err());
    }

    #[test]
    fn text_columns() {
        let row = json!({"s": "abc", "empty": "", "n": 7, "null": null});
        assert_eq!(get_string(&row, "s").unwrap(), "abc");
        assert_eq!(get_string(&row, "n").unwrap(), "7");
        assert!(get_string(&row, "null").is_err());
        assert_eq!(get_opt_string(&row, "empty"), None);
        assert_eq!(get_opt_string(&row, "null"), None);
        assert_eq!(get_i64(&json!({"y": "2023"}), "y").unwrap(), 2023);
    }

    #[test]
    fn changed_fields_are_lenient() {
        let row = json!({"cf": {"estado": true, "monto": false, "notas": "x", "otro": null}});
        let fields = get_changed_fields(&row, "cf").unwrap().unwrap();
        assert_eq!(fields.get("estado"), Some(&true));
        assert_eq!(fields.get("monto"), Some(&false));
        assert_eq!(fields.get("notas"), Some(&true));
        assert_eq!(fields.get("otro"), Some(&false));
        assert!(get_changed_fields(&json!({"cf": "estado"}), "cf").is_err());
        assert_eq!(get_changed_fields(&json!({}), "cf").unwrap(), None);
    }

    #[test]
    fn parse_enum_matches_snake_case() {
        let action: rib_core::enums::AuditAction = parse_enum("status_changed").unwrap();
        assert_eq!(action, rib_core::enums::AuditAction::StatusChanged);
        assert!(parse_enum::<rib_core::enums::AuditAction>("archived").is_err());
    }
}
