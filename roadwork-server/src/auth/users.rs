use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info, warn};

use super::password::verify_password;

/// Members of this team may use the admin endpoints.
pub const ADMIN_TEAM: &str = "admin";

/// Checked in place of a real hash when the username is unknown, so a miss
/// costs the same PBKDF2 run as a wrong password.
const UNKNOWN_USER_HASH: &str = "pbkdf2-sha256$100000$\
    726f6164776f726b2d756e6b6e6f776e$\
    0000000000000000000000000000000000000000000000000000000000000000";

/// One entry of `users.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
    /// Hash produced by `/salt/:password`.
    pub password: String,
    #[serde(default)]
    pub teams: Vec<String>,
}

impl User {
    pub fn has_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }

    pub fn is_admin(&self) -> bool {
        self.has_team(ADMIN_TEAM)
    }
}

/// Users known to the server, keyed by username.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<String, User>,
}

impl UserRegistry {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.username.clone(), u)).collect(),
        }
    }

    /// Load `users.json`. A missing or unreadable file yields an empty registry.
    pub fn load(path: &Path) -> Self {
        info!(path = %path.display(), "loading users");
        if !path.exists() {
            warn!(path = %path.display(), "no users file, every request will be rejected");
            return Self::default();
        }

        let parsed = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| serde_json::from_slice::<Vec<User>>(&bytes).map_err(|e| e.to_string()));

        match parsed {
            Ok(users) => {
                info!(count = users.len(), "users loaded");
                Self::new(users)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "unable to read users");
                Self::default()
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Return the user if the password matches.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        match self.get(username) {
            Some(user) => verify_password(password, &user.password).then_some(user),
            None => {
                verify_password(password, UNKNOWN_USER_HASH);
                None
            }
        }
    }

    /// Every team any user belongs to, sorted.
    pub fn teams(&self) -> Vec<String> {
        self.users
            .values()
            .flat_map(|u| u.teams.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}
