pub mod data;
pub mod admin;
pub mod salt;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all API routes, CORS, and tracing middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/setData/:team/:service", axum::routing::post(data::set_data))
        .route("/admin/teams", axum::routing::get(admin::list_teams))
        .route("/salt/:password", axum::routing::get(salt::salt))
        .route("/health", axum::routing::get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Simple health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use roadwork_core::traits::clock::FixedClock;
    use roadwork_core::{Reconciler, Status, SyncRecord, SyncSet};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::password::{hash_with_salt, verify_password};
    use crate::auth::{User, UserRegistry};
    use crate::store::JsonFileStore;

    const NOW: i64 = 1_700_000_900_000;

    fn user(name: &str, password: &str, teams: &[&str]) -> User {
        User {
            username: name.to_string(),
            password: hash_with_salt(password, &[7; 16], 1_000).unwrap(),
            teams: teams.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn app(data: &std::path::Path) -> Router {
        let users = UserRegistry::new(vec![
            user("alice", "pw-a", &["north"]),
            user("root", "pw-r", &["admin", "south"]),
        ]);
        let reconciler = Reconciler::new(
            Arc::new(JsonFileStore::new(data)),
            Arc::new(FixedClock::new(NOW)),
        );
        build_router(Arc::new(AppState { reconciler, users }))
    }

    fn basic(user: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
    }

    fn post(uri: &str, auth: Option<String>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, auth: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path()).oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"ok");
    }

    #[tokio::test]
    async fn test_set_data_requires_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path())
            .oneshot(post("/setData/north/paris", None, "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"Roadwork\""
        );
    }

    #[tokio::test]
    async fn test_set_data_rejects_wrong_password() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path())
            .oneshot(post("/setData/north/paris", Some(basic("alice", "nope")), "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_set_data_rejects_other_team() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path())
            .oneshot(post("/setData/south/paris", Some(basic("alice", "pw-a")), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!dir.path().join("south").exists());
    }

    #[tokio::test]
    async fn test_set_data_merges_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let first = r#"{"rw-1": {"status": "Finished", "dirty": true, "serverUpdateTime": 0, "localUpdateTime": 10}}"#;
        let response = app
            .clone()
            .oneshot(post("/setData/north/paris.json", Some(basic("alice", "pw-a")), first))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let merged: SyncSet = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let rw1 = merged.get("rw-1").unwrap();
        assert!(!rw1.dirty);
        assert_eq!(rw1.server_update_time, 0);
        assert!(dir.path().join("north").join("paris.json").exists());

        // A stale client downgrading the record loses to the stored status.
        let stale = r#"{"rw-1": {"status": "New", "dirty": true, "serverUpdateTime": -5, "localUpdateTime": 20}}"#;
        let response = app
            .oneshot(post("/setData/north/paris", Some(basic("alice", "pw-a")), stale))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let merged: SyncSet = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(merged.get("rw-1"), Some(&SyncRecord::clean(Status::Finished, 0)));
    }

    #[tokio::test]
    async fn test_set_data_stamps_accepted_edit() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let auth = || Some(basic("alice", "pw-a"));

        let seed = r#"{"rw-1": {"status": "New", "dirty": false, "serverUpdateTime": 100, "localUpdateTime": 100}}"#;
        app.clone()
            .oneshot(post("/setData/north/paris", auth(), seed))
            .await
            .unwrap();

        let edit = r#"{"rw-1": {"status": "Ongoing", "dirty": true, "serverUpdateTime": 100, "localUpdateTime": 150}}"#;
        let response = app
            .oneshot(post("/setData/north/paris", auth(), edit))
            .await
            .unwrap();

        let merged: SyncSet = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(merged.get("rw-1"), Some(&SyncRecord::clean(Status::Ongoing, NOW)));
    }

    #[tokio::test]
    async fn test_set_data_rejects_unknown_status() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"{"rw-1": {"status": "Cancelled", "dirty": true, "serverUpdateTime": 0, "localUpdateTime": 0}}"#;
        let response = app(dir.path())
            .oneshot(post("/setData/north/paris", Some(basic("alice", "pw-a")), body))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_set_data_rejects_path_separator_in_service() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path())
            .oneshot(post("/setData/north/a%5Cb", Some(basic("alice", "pw-a")), "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_teams_requires_admin() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path())
            .oneshot(get("/admin/teams", Some(basic("alice", "pw-a"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_teams_lists_all_teams() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path())
            .oneshot(get("/admin/teams", Some(basic("root", "pw-r"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let teams: Vec<String> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(teams, vec!["admin", "north", "south"]);
    }

    #[tokio::test]
    async fn test_salt_returns_verifiable_hash() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path()).oneshot(get("/salt/hunter2", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let hash = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(verify_password("hunter2", &hash));
    }
}
