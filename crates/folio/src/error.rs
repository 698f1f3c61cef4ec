//! Error types for folio.
//!
//! This module defines all error types used throughout the folio crate,
//! grouped by the layer that produces them.

use std::path::PathBuf;
use thiserror::Error;

use crate::content::EntityKind;

/// The main error type for folio operations.
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

    // === Content Errors ===
    /// No entity with the given id exists in the snapshot.
    #[error("{kind} entry '{id}' not found")]
    EntityNotFound {
        /// Which list was searched.
        kind: EntityKind,
        /// The id that did not match.
        id: String,
    },

    /// Required fields were empty at submit time.
    #[error("missing required fields: {}", fields.join(", "))]
    Validation {
        /// Names of the empty fields, in form order.
        fields: Vec<&'static str>,
    },

    /// A URL was rejected by the URL policy.
    #[error("rejected URL '{url}': {reason}")]
    UrlRejected {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A contact message failed validation.
    #[error("invalid contact message: {0}")]
    Contact(String),

    // === Admin Errors ===
    /// The submitted credentials did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// A mutation was attempted without an authenticated session.
    #[error("admin login required")]
    NotAuthenticated,

    /// A form action was attempted while no form was open.
    #[error("no {0} form is open")]
    NoOpenForm(EntityKind),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for folio operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an entity-not-found error.
    #[must_use]
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a URL rejection error.
    #[must_use]
    pub fn url_rejected(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UrlRejected {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a contact validation error.
    #[must_use]
    pub fn contact(message: impl Into<String>) -> Self {
        Self::Contact(message.into())
    }

    /// Check if this error is a form validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::UrlRejected { .. } | Self::Contact(_)
        )
    }

    /// Check if this error is an authentication failure.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::NotAuthenticated)
    }

    /// Check if this error means the target entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}
