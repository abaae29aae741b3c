use std::fmt;

use crate::error::{Result, SyncError};

/// The (team, service) pair that scopes one independently synced record set.
///
/// Both parts end up as path components in file-backed stores, so they are
/// validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    team: String,
    service: String,
}

impl Namespace {
    pub fn new(team: impl Into<String>, service: impl Into<String>) -> Result<Self> {
        let team = team.into();
        let service = service.into();
        validate_component("team", &team)?;
        validate_component("service", &service)?;
        Ok(Self { team, service })
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.team, self.service)
    }
}

fn validate_component(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SyncError::InvalidNamespace(format!("{kind} must not be empty")));
    }
    if value == "." || value == ".." {
        return Err(SyncError::InvalidNamespace(format!("{kind} '{value}' is reserved")));
    }
    if value.contains(['/', '\\', '\0']) {
        return Err(SyncError::InvalidNamespace(format!(
            "{kind} '{value}' contains a path separator"
        )));
    }
    Ok(())
}
