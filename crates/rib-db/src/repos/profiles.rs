//! Actor display-name lookup.

use std::collections::{BTreeSet, HashMap};

use rib_core::entities::{AuditLogEntry, AuditLogWithActorName};

use crate::helpers::get_opt_string;
use crate::query::SelectQuery;
use crate::service::RibService;
use crate::store::RemoteStore;

const PROFILE_ID: &str = "id";

impl<S: RemoteStore> RibService<S> {
    /// Resolve display names for a set of user ids in one query.
    ///
    /// Ids without a profile, or whose name is empty, are absent from the
    /// map. If the lookup fails the map is empty; the failure is only logged.
    pub async fn resolve_display_names(&self, user_ids: &[String]) -> HashMap<String, String> {
        let distinct: BTreeSet<&str> = user_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .collect();
        if distinct.is_empty() {
            return HashMap::new();
        }

        let lookup = self.profiles();
        let query = SelectQuery::new(&lookup.table)
            .columns(format!("{PROFILE_ID},{}", lookup.name_column))
            .in_list(PROFILE_ID, &distinct);
        tracing::debug!(%query, ids = distinct.len(), "resolving actor names");

        match self.store().select(&query).await {
            Ok(rows) => rows
                .iter()
                .filter_map(|row| {
                    let id = get_opt_string(row, PROFILE_ID)?;
                    let name = get_opt_string(row, &lookup.name_column)?;
                    let name = name.trim();
                    (!name.is_empty()).then(|| (id, name.to_string()))
                })
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, ids = distinct.len(), "actor name lookup failed");
                HashMap::new()
            }
        }
    }

    /// Attach display names to a ledger page. Never drops or alters entries.
    pub(crate) async fn with_actor_names(
        &self,
        entries: Vec<AuditLogEntry>,
    ) -> Vec<AuditLogWithActorName> {
        let actor_ids: Vec<String> = entries
            .iter()
            .filter_map(|e| e.actor_user_id.clone())
            .collect();
        let names = self.resolve_display_names(&actor_ids).await;

        entries
            .into_iter()
            .map(|entry| {
                let actor_display_name = entry
                    .actor_user_id
                    .as_ref()
                    .and_then(|id| names.get(id).cloned());
                AuditLogWithActorName {
                    entry,
                    actor_display_name,
                }
            })
            .collect()
    }
}
