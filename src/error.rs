//! Storage and configuration error types.
//!
//! The simulation itself never fails: invalid actions are rejected as no-ops.
//! Only the I/O edges (unlock persistence, settings files) produce errors, and
//! callers are expected to fall back to defaults after logging them.

use std::fmt;

/// Failure reading or writing a persisted record
#[derive(Debug)]
pub enum StorageError {
    /// The backing file could not be read or written.
    Io(std::io::Error),

    /// The stored data exists but is not valid JSON for the expected shape.
    Corrupt(serde_json::Error),

    /// A value could not be serialized for writing.
    Encode(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "storage I/O failed: {err}"),
            StorageError::Corrupt(err) => write!(f, "stored data is corrupt: {err}"),
            StorageError::Encode(err) => write!(f, "could not encode data for storage: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Corrupt(err) | StorageError::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// Parse failures are the common case; writers map to `Encode` explicitly
impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Corrupt(err)
    }
}
