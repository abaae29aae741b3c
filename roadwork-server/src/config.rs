use std::env;
use std::path::PathBuf;

use roadwork_core::ReconcileOptions;

/// Server configuration loaded from environment variables.
pub struct Config {
    /// Directory holding `users.json` and one subdirectory per team.
    pub data_path: PathBuf,
    /// Port for the HTTP listener.
    pub http_port: u16,
    /// How store failures reach clients.
    pub reconcile: ReconcileOptions,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `ROADWORK_DATA_PATH` (optional, default `data`): data directory.
    /// - `HTTP_PORT` (optional, default 8080): port for the HTTP API.
    /// - `ROADWORK_FAIL_ON_LOAD_ERROR` (optional, default false): reject a
    ///   merge when the stored set cannot be read instead of merging against
    ///   an empty set.
    /// - `ROADWORK_FAIL_ON_SAVE_ERROR` (optional, default true): report
    ///   persistence failures to the client.
    pub fn from_env() -> Self {
        let data_path = env::var("ROADWORK_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let http_port = env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        let defaults = ReconcileOptions::default();
        let reconcile = ReconcileOptions {
            fail_on_load_error: env_flag("ROADWORK_FAIL_ON_LOAD_ERROR")
                .unwrap_or(defaults.fail_on_load_error),
            fail_on_save_error: env_flag("ROADWORK_FAIL_ON_SAVE_ERROR")
                .unwrap_or(defaults.fail_on_save_error),
        };

        Self {
            data_path,
            http_port,
            reconcile,
        }
    }

    /// Location of the user registry.
    pub fn users_path(&self) -> PathBuf {
        self.data_path.join("users.json")
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
