use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error, info};

use roadwork_core::traits::storage::RecordStore;
use roadwork_core::{Namespace, SyncError, SyncSet};

/// Record store backed by one JSON file per namespace.
///
/// Sets are stored at `{root}/{team}/{service}.json`. Writes go to a sibling
/// `.tmp` file that is renamed over the target.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given data directory.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Return the filesystem path for a namespace.
    pub fn set_path(&self, namespace: &Namespace) -> PathBuf {
        self.root
            .join(namespace.team())
            .join(format!("{}.json", namespace.service()))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self, namespace: &Namespace) -> Result<Option<SyncSet>, SyncError> {
        let path = self.set_path(namespace);
        debug!(path = %path.display(), "load");

        let load_error = |reason: String| {
            error!(path = %path.display(), %reason, "unable to read records");
            SyncError::Load {
                namespace: namespace.to_string(),
                reason,
            }
        };

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(namespace = %namespace, "nothing stored");
                return Ok(None);
            }
            Err(e) => return Err(load_error(format!("read failed: {e}"))),
        };
        let set: SyncSet = serde_json::from_slice(&bytes)
            .map_err(|e| load_error(format!("parse failed: {e}")))?;

        debug!(namespace = %namespace, records = set.len(), "loaded");
        Ok(Some(set))
    }

    async fn save(&self, namespace: &Namespace, set: &SyncSet) -> Result<(), SyncError> {
        let path = self.set_path(namespace);
        info!(path = %path.display(), records = set.len(), "save");

        let save_error = |reason: String| {
            error!(path = %path.display(), %reason, "unable to save records");
            SyncError::Save {
                namespace: namespace.to_string(),
                reason,
            }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| save_error(format!("create dir failed: {e}")))?;
        }

        let bytes = serde_json::to_vec_pretty(set)
            .map_err(|e| save_error(format!("serialize failed: {e}")))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| save_error(format!("write failed: {e}")))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| save_error(format!("rename failed: {e}")))?;

        Ok(())
    }
}
