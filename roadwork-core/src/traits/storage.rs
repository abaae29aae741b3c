use async_trait::async_trait;

use crate::error::SyncError;
use crate::model::{Namespace, SyncSet};

/// Persistence of one [`SyncSet`] per namespace.
///
/// Implementations log their own failures and also return them; whether a
/// failure reaches the client is decided by the engine's policy.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the stored set, or `Ok(None)` if the namespace was never saved.
    async fn load(&self, namespace: &Namespace) -> Result<Option<SyncSet>, SyncError>;

    /// Replace the stored set, creating the namespace location if needed.
    async fn save(&self, namespace: &Namespace, set: &SyncSet) -> Result<(), SyncError>;
}
