use rib_core::entities::EntityId;
use rib_core::enums::EntityKind;
use rib_db::audit_table;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a record id using the identity type of `kind`'s ledger.
pub fn parse_entity_id(kind: EntityKind, raw: &str) -> anyhow::Result<EntityId> {
    EntityId::parse_as(audit_table(kind).id_kind, raw)
        .map_err(|error| anyhow::anyhow!("invalid {kind} id: {error}"))
}

/// Parse an optional JSON object of procedure arguments. Absent means `{}`.
pub fn parse_json_args(raw: Option<&str>) -> anyhow::Result<serde_json::Value> {
    let Some(raw) = raw else {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    };
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|error| anyhow::anyhow!("invalid --args JSON: {error}"))?;
    if !value.is_object() {
        anyhow::bail!("--args must be a JSON object");
    }
    Ok(value)
}
