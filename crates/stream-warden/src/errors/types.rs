//! Error type definitions for stream-warden
//!
//! All errors used throughout the crate are defined here, with `thiserror`
//! providing the trait implementations and error chaining.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Registry layer errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Playlist source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a configuration error from any displayable message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error from any displayable message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}

/// Registry (persistence gateway) specific errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Uniqueness violations (slug, etc.)
    #[error("Constraint violation: {field} = {value}")]
    Constraint { field: String, value: String },

    /// Record not found
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// A stored value could not be decoded into its domain type
    #[error("Corrupt record: {field} = {value}")]
    Decode { field: String, value: String },
}

impl RegistryError {
    /// Whether this error is a recoverable uniqueness conflict
    pub fn is_constraint(&self) -> bool {
        matches!(self, RegistryError::Constraint { .. })
    }
}

/// Playlist source handling errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Network failure retrieving a playlist
    #[error("Fetch failed: {url} - {message}")]
    Fetch { url: String, message: String },

    /// Retrieval exceeded the source timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Retrieval succeeded but the body held no parseable entries
    #[error("Unparseable playlist: {url}")]
    Format { url: String },
}
