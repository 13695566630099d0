use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a history store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed stored data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid user id {0:?} (use letters, digits, '-' or '_')")]
    InvalidUser(String),

    #[error(transparent)]
    Write(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
