//! Centralized error handling for stream-warden
//!
//! Error types are layered the same way the rest of the crate is: source
//! handling (playlist fetching/parsing), registry access (persistence),
//! and a top-level application error that everything converts into.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for registry Results
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Convenience type alias for source Results
pub type SourceResult<T> = Result<T, SourceError>;
