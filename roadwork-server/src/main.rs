mod config;
mod error;
mod state;
mod platform;
mod store;
mod auth;
mod api;

use std::net::SocketAddr;
use std::sync::Arc;

use roadwork_core::Reconciler;
use tracing_subscriber::EnvFilter;

use auth::UserRegistry;
use config::Config;
use platform::SystemClock;
use state::AppState;
use store::JsonFileStore;

#[tokio::main]
async fn main() {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("roadwork_server=info,roadwork_core=info,tower_http=info")
            }),
        )
        .init();

    tracing::info!("Roadwork Server starting...");

    // Load .env file if present (non-fatal if missing).
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }

    let config = Config::from_env();
    tracing::info!(
        data_path = %config.data_path.display(),
        http_port = config.http_port,
        fail_on_load_error = config.reconcile.fail_on_load_error,
        fail_on_save_error = config.reconcile.fail_on_save_error,
        "configuration loaded"
    );

    let users = UserRegistry::load(&config.users_path());
    tracing::info!(users = users.len(), teams = users.teams().len(), "user registry ready");
    let reconciler = Reconciler::with_options(
        Arc::new(JsonFileStore::new(&config.data_path)),
        Arc::new(SystemClock::new()),
        config.reconcile,
    );

    let state = Arc::new(AppState { reconciler, users });
    let router = api::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind HTTP listener");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "Roadwork Server running");

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!(error = %e, "Axum server error");
        std::process::exit(1);
    }
}
