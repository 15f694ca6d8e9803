/*
[INPUT]:  Error sources (filesystem, serialization, clipboard, configuration)
[OUTPUT]: Structured error types for the core crate
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Errors raised by a [`TaskStorage`](crate::storage::TaskStorage) backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task list could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Replacing the target file with the freshly written temp file failed
    #[error("Temporary file error: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Stored content exists but is not a task list
    #[error("Stored task list at {path} is corrupted: {reason}")]
    Corrupted { path: String, reason: String },

    /// Key contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Whether repeating the same write later can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorageError::Io(_) | StorageError::Persist(_) | StorageError::Unavailable(_)
        )
    }
}

/// Task store failures. Mutations never return these directly; a failed save
/// is kept as a pending warning on the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to load task list '{key}': {source}")]
    Load {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("changes to task list '{key}' were not saved: {source}")]
    Save {
        key: String,
        #[source]
        source: StorageError,
    },
}

impl StoreError {
    pub fn storage_error(&self) -> &StorageError {
        match self {
            StoreError::Load { source, .. } | StoreError::Save { source, .. } => source,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display)
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// Clipboard opened but refused the text
    #[error("Clipboard rejected text: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;
