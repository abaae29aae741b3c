use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::users::User;
use crate::error::ServerError;
use crate::state::AppState;

/// Username and password from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse the header value. The password may itself contain `:`.
    pub fn parse(header: &str) -> Option<Self> {
        let (scheme, encoded) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// A request whose Basic credentials match a user in the registry.
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let credentials = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(BasicCredentials::parse)
            .ok_or_else(|| ServerError::Unauthorized("missing credentials".to_string()))?;

        // Password hashing is CPU bound; keep it off the async workers.
        let username = credentials.username.clone();
        let state = state.clone();
        let user = tokio::task::spawn_blocking(move || {
            state
                .users
                .authenticate(&credentials.username, &credentials.password)
                .cloned()
        })
        .await
        .map_err(|e| ServerError::Internal(format!("authentication task failed: {e}")))?;

        match user {
            Some(user) => Ok(AuthenticatedUser(user)),
            None => {
                tracing::warn!(user = %username, "rejected credentials");
                Err(ServerError::Unauthorized("bad credentials".to_string()))
            }
        }
    }
}
