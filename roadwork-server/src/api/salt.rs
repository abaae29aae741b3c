use axum::extract::Path;

use crate::auth::password::hash_password;
use crate::error::{Result, ServerError};

/// GET /salt/:password
///
/// Returns a salted hash of `password`, ready to paste into `users.json`.
pub async fn salt(Path(password): Path<String>) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServerError::Internal(format!("hash task failed: {e}")))?
}
