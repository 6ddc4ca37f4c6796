//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Stored value under '{key}' has an unexpected shape: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        StorageError::Unavailable(format!("storage task failed: {err}"))
    }
}
