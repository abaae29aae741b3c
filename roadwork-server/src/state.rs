use roadwork_core::Reconciler;

use crate::auth::UserRegistry;

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState {
    /// Merge engine over the JSON file store.
    pub reconciler: Reconciler,
    /// Users loaded from `users.json` at start-up.
    pub users: UserRegistry,
}
