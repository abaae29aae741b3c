use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::error::SyncError;
use crate::model::{Namespace, SyncSet};
use crate::traits::storage::RecordStore;

/// Thread-safe in-memory record store backed by DashMap.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: DashMap<Namespace, SyncSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set stored for a namespace.
    pub fn put(&self, namespace: &Namespace, set: SyncSet) {
        self.sets.insert(namespace.clone(), set);
    }

    /// Get a clone of the set stored for a namespace.
    pub fn get(&self, namespace: &Namespace) -> Option<SyncSet> {
        self.sets.get(namespace).map(|entry| entry.clone())
    }

    /// Number of namespaces holding a set.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self, namespace: &Namespace) -> Result<Option<SyncSet>, SyncError> {
        Ok(self.get(namespace))
    }

    async fn save(&self, namespace: &Namespace, set: &SyncSet) -> Result<(), SyncError> {
        debug!(namespace = %namespace, records = set.len(), "stored in memory");
        self.put(namespace, set.clone());
        Ok(())
    }
}
