use thiserror::Error;

/// Engine-wide error types for Arbiter.
///
/// Only `InvalidMetadata` ever crosses the `evaluate` boundary. Everything
/// else is recovered inside the engine as a conservative default score.
#[derive(Debug, Error)]
pub enum ArbiterError {
    /// The supplied artifact metadata cannot be scored (e.g. no identifier).
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// A registry reader failed to answer a lookup.
    #[error("Registry error: {0}")]
    Registry(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem error while loading a registry snapshot or metadata file.
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid or unreadable configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ArbiterError {
    fn from(e: serde_json::Error) -> Self {
        ArbiterError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for ArbiterError {
    fn from(e: std::io::Error) -> Self {
        ArbiterError::Io(e.to_string())
    }
}
