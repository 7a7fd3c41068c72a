use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AuditAction, EntityIdKind};
use crate::errors::CoreError;

/// Identity of a tracked record. Ledger tables key on either a numeric
/// primary key or an opaque text id, depending on the entity kind.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntityId {
    Numeric(i64),
    Text(String),
}

impl EntityId {
    /// Parse a raw id (e.g. from the command line) for a table whose identity
    /// column has the given kind.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an empty id, or a non-integer id
    /// when `kind` is numeric.
    pub fn parse_as(kind: EntityIdKind, raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CoreError::Validation("entity id must not be empty".into()));
        }
        match kind {
            EntityIdKind::Numeric => raw.parse::<i64>().map(Self::Numeric).map_err(|e| {
                CoreError::Validation(format!("entity id '{raw}' is not numeric: {e}"))
            }),
            EntityIdKind::Text => Ok(Self::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// One recorded mutation of a tracked record. Ledger rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: String,
    pub entity_id: EntityId,
    /// `None` for system-initiated changes.
    pub actor_user_id: Option<String>,
    /// Snapshot of the actor's email at change time.
    pub actor_email: Option<String>,
    pub action: AuditAction,
    /// Field name -> whether it changed. Absent on `created`/`deleted`.
    pub changed_fields: Option<BTreeMap<String, bool>>,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Names of the fields flagged as changed, in key order.
    #[must_use]
    pub fn changed_field_names(&self) -> Vec<&str> {
        self.changed_fields
            .iter()
            .flatten()
            .filter(|(_, changed)| **changed)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// An [`AuditLogEntry`] enriched with the actor's resolved display name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditLogWithActorName {
    #[serde(flatten)]
    pub entry: AuditLogEntry,
    pub actor_display_name: Option<String>,
}

impl AuditLogWithActorName {
    /// Human label for the actor: display name, falling back to the email snapshot.
    #[must_use]
    pub fn actor_label(&self) -> Option<&str> {
        self.actor_display_name
            .as_deref()
            .or(self.entry.actor_email.as_deref())
    }
}

/// Summary of a record's change history. Recomputed on every query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChangeStats {
    pub total_changes: usize,
    pub last_modified_by: Option<String>,
    pub last_modified_at: Option<DateTime<Utc>>,
}

impl ChangeStats {
    /// Zero changes, no editor, no timestamp.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_changes: 0,
            last_modified_by: None,
            last_modified_at: None,
        }
    }

    /// Reduce a newest-first ledger page to summary statistics.
    #[must_use]
    pub fn from_logs(logs: &[AuditLogWithActorName]) -> Self {
        let Some(latest) = logs.first() else {
            return Self::empty();
        };
        Self {
            total_changes: logs.len(),
            last_modified_by: latest.actor_label().map(str::to_string),
            last_modified_at: Some(latest.entry.created_at),
        }
    }
}
