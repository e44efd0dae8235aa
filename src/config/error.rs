//! Failures raised while loading or validating configuration.

use thiserror::Error;

/// Failure while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A well-typed but unusable configuration value.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required setting: {0}")]
    MissingRequired(&'static str),

    #[error("Port must be non-zero")]
    InvalidPort,

    #[error("Invalid server bind address")]
    InvalidBindAddress,

    #[error("Request timeout out of range")]
    InvalidTimeout,

    #[error("OpenAI base URL must be http(s)")]
    InvalidOpenAiUrl,

    #[error("Qdrant base URL must be http(s)")]
    InvalidQdrantUrl,

    #[error("Vector size must be non-zero")]
    InvalidVectorSize,

    #[error("Chunk size must be non-zero")]
    InvalidChunkSize,

    #[error("Chunk overlap must be smaller than chunk size")]
    InvalidChunkOverlap,

    #[error("Probe timeout must be between 1 and 60 seconds")]
    InvalidProbeTimeout,

    #[error("Trace timeout must be between 1 and 120 seconds")]
    InvalidTraceTimeout,
}
