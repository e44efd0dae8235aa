//! Embedding Generator Port - Interface for text embedding providers.

use async_trait::async_trait;
use thiserror::Error;

/// Port for embedding providers.
#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    /// Embeds a batch of texts, returning one vector per input, in
    /// input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Dimension of the produced vectors.
    fn dimension(&self) -> usize;
}

/// Embedding provider errors.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request (for example, an empty batch).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl EmbeddingError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EmbeddingError::RateLimited { .. } | EmbeddingError::Network(_)
        )
    }
}
