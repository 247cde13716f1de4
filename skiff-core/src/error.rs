//! Error types for Skiff.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Skiff operations.
pub type Result<T> = std::result::Result<T, SkiffError>;

/// Main error type for Skiff.
///
/// Every error is fatal to the deployment run. There is no partial-success
/// mode and no local recovery; engine failures are surfaced unmodified.
#[derive(Error, Debug)]
pub enum SkiffError {
    // Configuration errors
    #[error("Required configuration key missing or empty: {key}")]
    ConfigurationMissing { key: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("File read error: {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Declaration errors
    #[error("Duplicate {kind} resource: {name}")]
    DuplicateResource { kind: &'static str, name: String },

    #[error("Unknown tag reference: {reference}")]
    UnknownTag { reference: String },

    // Engine errors
    #[error("Provisioning failed for {resource}: {reason}")]
    Provisioning { resource: String, reason: String },

    #[error("Stack output never resolved: {name}")]
    OutputUnresolved { name: String },

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SkiffError {
    /// Create an Internal error from any error type.
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(err.to_string())
    }
}
