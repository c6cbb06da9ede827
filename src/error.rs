//! Unified error hierarchy for workoutrs
//!
//! Only index-range violations are expected to reach callers of the record store during
//! normal CRUD flows; storage and seed failures are logged and degrade to empty state.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all workoutrs operations
#[derive(Debug, Error)]
pub enum WorkoutRsError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Seed catalog errors
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Positional lookup outside the collection
    #[error("Index {index} out of range for {collection} (len {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

/// Errors raised by a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Could not open the backing database
    #[error("Failed to open storage at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// Snapshot could not be encoded
    #[error("Failed to encode {key}: {reason}")]
    Encode { key: String, reason: String },

    /// Snapshot could not be decoded
    #[error("Failed to decode {key}: {reason}")]
    Decode { key: String, reason: String },
}

/// Errors raised while loading the seed catalog
#[derive(Debug, Error)]
pub enum SeedError {
    /// Seed file could not be read
    #[error("Failed to read seed file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed document is not a valid workout catalog
    #[error("Malformed seed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type alias for workoutrs operations
pub type Result<T> = std::result::Result<T, WorkoutRsError>;

impl WorkoutRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WorkoutRsError::Seed(_) => ErrorSeverity::Warning,
            WorkoutRsError::Storage(StorageError::Decode { .. }) => ErrorSeverity::Warning,
            WorkoutRsError::IndexOutOfRange { .. } => ErrorSeverity::Critical,
            WorkoutRsError::Storage(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WorkoutRsError::Seed(SeedError::Unreadable { path, .. }) => {
                format!("Could not read the workout catalog: {}", path.display())
            }
            WorkoutRsError::Seed(SeedError::Malformed(_)) => {
                "The workout catalog file is malformed; starting with an empty catalog."
                    .to_string()
            }
            WorkoutRsError::Storage(StorageError::OpenFailed { path, .. }) => {
                format!(
                    "Unable to open the data store at {}. Please check your configuration.",
                    path.display()
                )
            }
            WorkoutRsError::IndexOutOfRange { collection, index, .. } => {
                format!("There is no {} at position {}.", collection, index)
            }
            _ => self.to_string(),
        }
    }

    /// Emit this error as a tracing event at its severity level
    pub fn log(&self, message: &str) {
        let level = self.severity().to_tracing_level();
        if level == tracing::Level::ERROR {
            tracing::error!(error = %self, "{}", message);
        } else {
            tracing::warn!(error = %self, "{}", message);
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Programmer error, the caller broke a contract
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
