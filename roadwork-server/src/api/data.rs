use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use tracing::Instrument;

use roadwork_core::{Namespace, SyncSet};

use crate::auth::AuthenticatedUser;
use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Clients may address a service by its file name.
fn service_name(raw: &str) -> &str {
    raw.strip_suffix(".json").unwrap_or(raw)
}

/// POST /setData/:team/:service
///
/// Reconciles the posted record set with the one stored for the namespace and
/// returns the authoritative result. The caller must belong to `team`.
pub async fn set_data(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((team, service)): Path<(String, String)>,
    Json(incoming): Json<SyncSet>,
) -> Result<Json<SyncSet>> {
    let service = service_name(&service).to_string();
    let span = tracing::info_span!("set_data", user = %user.username, %team, %service);

    async move {
        if !user.has_team(&team) {
            tracing::warn!("user does not belong to that team");
            return Err(ServerError::Unauthorized(format!(
                "user '{}' is not a member of team '{}'",
                user.username, team
            )));
        }

        let namespace = Namespace::new(team, service)?;
        let merged = state.reconciler.reconcile(&namespace, incoming).await?;
        Ok(Json(merged))
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_strips_json_suffix() {
        assert_eq!(service_name("paris.json"), "paris");
        assert_eq!(service_name("paris"), "paris");
        assert_eq!(service_name("paris.json.json"), "paris.json");
    }
}
