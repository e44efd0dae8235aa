//! Vector Index Port - Interface to the external vector database.
//!
//! The index stores document chunk vectors and answers nearest-neighbor
//! queries; its internal algorithms belong to the external service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::document::{DocumentChunk, DocumentId};

/// Port for vector index access.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Creates the backing collection when it does not exist yet.
    async fn ensure_collection(&self) -> Result<(), VectorIndexError>;

    /// Upserts chunk vectors with their payloads. `chunks` and
    /// `vectors` must have equal length.
    async fn upsert_chunks(
        &self,
        chunks: &[DocumentChunk],
        vectors: &[Vec<f32>],
    ) -> Result<(), VectorIndexError>;

    /// Returns the nearest chunks for a query vector.
    async fn search(&self, vector: &[f32], limit: usize)
        -> Result<Vec<ScoredChunk>, VectorIndexError>;

    /// Removes every vector belonging to a document.
    async fn delete_document(&self, document_id: DocumentId) -> Result<(), VectorIndexError>;
}

/// A chunk returned by a similarity search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// Document the chunk belongs to.
    pub document_id: DocumentId,
    /// Chunk text stored in the payload.
    pub text: String,
    /// Similarity score reported by the index.
    pub score: f32,
}

/// Vector index errors.
#[derive(Debug, Clone, Error)]
pub enum VectorIndexError {
    /// The index service is unavailable.
    #[error("index unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse an index response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request (for example, mismatched batch lengths).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl VectorIndexError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
