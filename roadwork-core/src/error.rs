use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Load error for {namespace}: {reason}")]
    Load { namespace: String, reason: String },

    #[error("Save error for {namespace}: {reason}")]
    Save { namespace: String, reason: String },

    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("Clock error: {0}")]
    Clock(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
