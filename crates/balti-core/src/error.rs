//! Error types for balti-core

use thiserror::Error;

/// Result type alias using balti-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in balti-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure talking to the Word Store or Preset Store
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered, but reported a failure
    #[error("API error: {0}")]
    Api(String),

    /// Client-side validation failed before any request was made
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A per-user operation was attempted without a user identity
    #[error("Sign in to manage saved searches")]
    NotAuthenticated,

    /// Preset deletion requires a stored preset id
    #[error("Preset has no id")]
    MissingPresetId,

    /// An operation of the same kind is already in flight
    #[error("Operation already in progress")]
    Busy,

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
