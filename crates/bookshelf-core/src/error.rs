//! Core error types

use thiserror::Error;

use bookshelf_storage::StorageError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] StorageError),

    #[error("Collection '{key}' is corrupt: {source}")]
    CorruptCollection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Decode { key, source } => CoreError::CorruptCollection { key, source },
            other => CoreError::StorageUnavailable(other),
        }
    }
}
