//! Core error types for satword-core.
//!
//! Every failure in the core degrades to a safe default somewhere up the
//! stack (empty catalog, empty known set, placeholder entry). These types
//! exist so the degraded paths can log what went wrong and so callers that
//! do care can match on the cause.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for satword-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Word list could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Daily selection failed
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Known-word storage errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading the word list resource.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Resource is absent or unreadable
    #[error("Word list not readable at {path}: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resource does not decode to an array of word records
    #[error("Word list is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised by the daily selector.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Index requested against a zero-length list
    #[error("Cannot select a word from an empty list")]
    EmptyList,
}

/// Known-word storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Persisted state exists but cannot be decoded
    #[error("Persisted state under '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },

    /// Underlying storage failed
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked by another process
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration schema
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg)
                if inner.code == rusqlite::ErrorCode::DatabaseBusy
                    || inner.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                DatabaseError::Locked
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
