//! Audit ledger reads.
//!
//! One generic reader serves every tracked kind; [`audit_table`] supplies the
//! table and column names. Listing reads propagate failures. `last_change`
//! and `change_stats` are best-effort summaries and never fail.

use serde_json::Value;

use rib_core::entities::{AuditLogEntry, AuditLogWithActorName, ChangeStats, EntityId};
use rib_core::enums::{AuditAction, EntityKind};

use crate::descriptor::{AuditTable, audit_table, columns};
use crate::error::DatabaseError;
use crate::helpers::{
    get_changed_fields, get_entity_id, get_opt_json, get_opt_string, get_string, parse_datetime,
    parse_enum,
};
use crate::query::SelectQuery;
use crate::service::RibService;
use crate::store::RemoteStore;

/// Filter criteria for ledger queries.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub entity_id: Option<EntityId>,
    pub action: Option<AuditAction>,
    /// Falls back to the configured default page size.
    pub limit: Option<u32>,
}

impl<S: RemoteStore> RibService<S> {
    /// Full change history of one record, newest first, with actor names.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ledger fetch fails or a row cannot be
    /// decoded. Name lookup failures only leave `actor_display_name` empty.
    pub async fn logs_by_entity_id(
        &self,
        kind: EntityKind,
        entity_id: &EntityId,
    ) -> Result<Vec<AuditLogWithActorName>, DatabaseError> {
        let table = audit_table(kind);
        let query = SelectQuery::new(table.log_table)
            .eq(table.entity_column, entity_id)
            .order_desc(columns::CREATED_AT);
        self.fetch_ledger(&table, &query).await
    }

    /// Change history of every record owned by `owner_key` (a RUC, or a RIB
    /// id for kinds linked to a RIB), newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if `kind` has no owner relation,
    /// and `DatabaseError` if the owner lookup or the ledger fetch fails.
    pub async fn logs_by_owner_key(
        &self,
        kind: EntityKind,
        owner_key: &str,
    ) -> Result<Vec<AuditLogWithActorName>, DatabaseError> {
        let table = audit_table(kind);
        let owner = table.owner.ok_or_else(|| {
            DatabaseError::InvalidState(format!("{kind} records have no owner key"))
        })?;

        let owner_query = SelectQuery::new(owner.table)
            .columns(owner.id_column)
            .eq(owner.key_column, owner_key);
        tracing::debug!(query = %owner_query, "resolving owned records");
        let ids = self
            .store()
            .select(&owner_query)
            .await?
            .iter()
            .map(|row| get_entity_id(row, owner.id_column))
            .collect::<Result<Vec<_>, _>>()?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = SelectQuery::new(table.log_table)
            .in_list(table.entity_column, &ids)
            .order_desc(columns::CREATED_AT);
        self.fetch_ledger(&table, &query).await
    }

    /// Query a ledger with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn query_audit(
        &self,
        kind: EntityKind,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditLogWithActorName>, DatabaseError> {
        let table = audit_table(kind);
        let mut query = SelectQuery::new(table.log_table)
            .order_desc(columns::CREATED_AT)
            .limit(filter.limit.unwrap_or_else(|| self.default_limit()));
        if let Some(ref entity_id) = filter.entity_id {
            query = query.eq(table.entity_column, entity_id);
        }
        if let Some(action) = filter.action {
            query = query.eq(columns::ACTION, action.as_str());
        }
        self.fetch_ledger(&table, &query).await
    }

    /// Most recent change of one record. `None` if there is none or the
    /// fetch fails.
    pub async fn last_change(
        &self,
        kind: EntityKind,
        entity_id: &EntityId,
    ) -> Option<AuditLogWithActorName> {
        let filter = AuditFilter {
            entity_id: Some(entity_id.clone()),
            action: None,
            limit: Some(1),
        };
        match self.query_audit(kind, &filter).await {
            Ok(logs) => logs.into_iter().next(),
            Err(e) => {
                tracing::warn!(%kind, %entity_id, error = %e, "last change unavailable");
                None
            }
        }
    }

    /// Summary of one record's history. Zeroed if the ledger cannot be read.
    pub async fn change_stats(&self, kind: EntityKind, entity_id: &EntityId) -> ChangeStats {
        match self.logs_by_entity_id(kind, entity_id).await {
            Ok(logs) => ChangeStats::from_logs(&logs),
            Err(e) => {
                tracing::warn!(%kind, %entity_id, error = %e, "change stats unavailable");
                ChangeStats::empty()
            }
        }
    }

    async fn fetch_ledger(
        &self,
        table: &AuditTable,
        query: &SelectQuery,
    ) -> Result<Vec<AuditLogWithActorName>, DatabaseError> {
        tracing::debug!(%query, "fetching audit ledger");
        let rows = self.store().select(query).await?;
        let mut entries = rows
            .iter()
            .map(|row| decode_entry(row, table))
            .collect::<Result<Vec<_>, _>>()?;
        // Stable, so rows sharing a timestamp keep the store's order.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(self.with_actor_names(entries).await)
    }
}

fn decode_entry(row: &Value, table: &AuditTable) -> Result<AuditLogEntry, DatabaseError> {
    Ok(AuditLogEntry {
        id: get_string(row, columns::ID)?,
        entity_id: get_entity_id(row, table.entity_column)?,
        actor_user_id: get_opt_string(row, columns::USER_ID),
        actor_email: get_opt_string(row, columns::USER_EMAIL),
        action: parse_enum(&get_string(row, columns::ACTION)?)?,
        changed_fields: get_changed_fields(row, columns::CHANGED_FIELDS)?,
        old_values: get_opt_json(row, columns::OLD_VALUES),
        new_values: get_opt_json(row, columns::NEW_VALUES),
        created_at: parse_datetime(&get_string(row, columns::CREATED_AT)?)?,
    })
}
