//! Service layer over the remote store.
//!
//! `RibService` wraps a [`RemoteStore`] together with the settings the
//! repositories need (profile lookup table, reconciliation years, default page
//! size). All read operations are implemented as `impl RibService` blocks in
//! [`crate::repos`].

use rib_config::{ReconcileConfig, RibConfig};

use crate::store::RemoteStore;

/// Where actor display names live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLookup {
    pub table: String,
    pub name_column: String,
}

/// Read-side orchestration for audit ledgers and financial records.
///
/// Primary reads propagate failures; enrichment and summaries degrade to
/// empty values and only log.
pub struct RibService<S> {
    store: S,
    profiles: ProfileLookup,
    reconcile: ReconcileConfig,
    default_limit: u32,
}

impl<S: RemoteStore> RibService<S> {
    /// Create a service over `store` using the loaded configuration.
    #[must_use]
    pub fn new(store: S, config: &RibConfig) -> Self {
        Self {
            store,
            profiles: ProfileLookup {
                table: config.backend.profiles_table.clone(),
                name_column: config.backend.profiles_name_column.clone(),
            },
            reconcile: config.reconcile.clone(),
            default_limit: config.general.default_limit,
        }
    }

    /// Access the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn profiles(&self) -> &ProfileLookup {
        &self.profiles
    }

    #[must_use]
    pub const fn reconcile_config(&self) -> &ReconcileConfig {
        &self.reconcile
    }

    /// Page size used when a caller does not pass a limit.
    #[must_use]
    pub const fn default_limit(&self) -> u32 {
        self.default_limit
    }
}
