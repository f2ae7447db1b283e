//! Error types for roster.
//!
//! This module defines all error types used throughout the roster crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::draft::ValidationError;

/// The main error type for roster operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// Writing a value to the durable store failed.
    #[error("failed to write '{key}' to durable store: {message}")]
    StorageWrite {
        /// Key that was being written.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    // === Roster Data Errors ===
    /// The stored roster is not valid roster JSON.
    #[error("stored roster is corrupt: {0}")]
    Parse(#[source] serde_json::Error),

    /// The roster could not be serialized.
    #[error("failed to serialize roster: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The seed dataset could not be read or parsed.
    #[error("failed to load seed data from {origin}: {message}")]
    SeedLoad {
        /// Where the seed came from (a path, or "bundled").
        origin: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A student with this id is already on the roster.
    #[error("a student with id '{id}' is already on the roster")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// A draft student was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for roster operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a durable store write error.
    #[must_use]
    pub fn storage_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageWrite {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a seed load error.
    #[must_use]
    pub fn seed_load(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SeedLoad {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Check if this error means the stored roster could not be parsed.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this error is a failed durable write.
    #[must_use]
    pub fn is_storage_write_error(&self) -> bool {
        matches!(self, Self::StorageWrite { .. })
    }

    /// Check if this error is a rejected draft.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
