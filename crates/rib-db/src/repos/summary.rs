//! Server-side aggregate summaries.

use serde_json::Value;

use crate::error::DatabaseError;
use crate::service::RibService;
use crate::store::RemoteStore;

impl<S: RemoteStore> RibService<S> {
    /// Call a summary procedure and return its JSON result unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the call fails.
    pub async fn summary(&self, function: &str, args: &Value) -> Result<Value, DatabaseError> {
        tracing::debug!(function, "calling summary procedure");
        self.store().rpc(function, args).await
    }
}
