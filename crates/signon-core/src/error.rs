//! Error types for credential mapping

use thiserror::Error;

/// Result type alias using CredentialError
pub type Result<T> = std::result::Result<T, CredentialError>;

/// Errors that can occur while mapping or round-tripping credential records
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Subject identifier was empty
    #[error("subject identifier must not be empty")]
    EmptySubject,

    /// Record could not be serialized to a JSON document
    #[error("credential serialization failed: {0}")]
    Serialization(String),

    /// JSON document could not be read back as a record
    #[error("credential deserialization failed: {0}")]
    Deserialization(String),
}
