use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::auth::{AuthenticatedUser, ADMIN_TEAM};
use crate::error::{Result, ServerError};
use crate::state::AppState;

/// GET /admin/teams
///
/// Lists every team known to the user registry. Admin team members only.
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<String>>> {
    let span = tracing::info_span!(
        "list_teams",
        user = %user.username,
        team = ADMIN_TEAM,
        service = tracing::field::Empty
    );
    span.in_scope(|| {
        if !user.is_admin() {
            tracing::warn!("user is not an admin");
            return Err(ServerError::Unauthorized(format!(
                "user '{}' is not a member of team '{ADMIN_TEAM}'",
                user.username
            )));
        }
        Ok(Json(state.users.teams()))
    })
}
