//! Persistence error types.

use std::path::PathBuf;

use drip_commerce::StoreError;
use thiserror::Error;

/// Errors that can occur in the file-backed stores.
#[derive(Error, Debug)]
pub enum DataError {
    /// An underlying filesystem operation failed.
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted line did not parse back into its record schema.
    #[error("Malformed record in {path} at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A record failed to serialize.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The username is already present in the directory.
    #[error("User already exists: {0}")]
    DuplicateUser(String),
}

impl DataError {
    /// Tag an I/O error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> DataError {
        let path = path.into();
        move |source| DataError::Io { path, source }
    }
}

impl From<DataError> for StoreError {
    fn from(e: DataError) -> Self {
        StoreError::PersistenceFailure(e.to_string())
    }
}
