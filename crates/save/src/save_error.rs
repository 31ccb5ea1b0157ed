// ---------------------------------------------------------------------------
// SaveError / StoreError: error types for layout persistence
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised by a [`KeyValueStore`](crate::store::KeyValueStore) backend.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The key cannot be mapped onto the backend (e.g. contains a path
    /// separator for a file-backed store).
    InvalidKey(String),
    /// The backend refused the operation for a reason of its own.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::InvalidKey(key) => write!(f, "Invalid storage key: {key:?}"),
            StoreError::Unavailable(msg) => write!(f, "Storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Errors that can occur while saving a layout.
#[derive(Debug)]
pub enum SaveError {
    /// The backend failed to write.
    Store(StoreError),
    /// JSON encoding failed.
    Encode(String),
    /// Migration from an older format failed.
    MigrationFailed(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Store(e) => write!(f, "Store error: {e}"),
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for SaveError {
    fn from(e: StoreError) -> Self {
        SaveError::Store(e)
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Store(StoreError::Io(e))
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Encode(e.to_string())
    }
}
