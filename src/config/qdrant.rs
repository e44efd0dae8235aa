//! Qdrant vector database configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Qdrant HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QdrantConfig {
    /// Qdrant base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection holding document chunks
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Embedding vector dimension
    #[serde(default = "default_vector_size")]
    pub vector_size: usize,

    /// Number of chunks retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl QdrantConfig {
    /// Validate Qdrant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::InvalidQdrantUrl);
        }
        if self.vector_size == 0 {
            return Err(ValidationError::InvalidVectorSize);
        }
        Ok(())
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection: default_collection(),
            vector_size: default_vector_size(),
            top_k: default_top_k(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_collection() -> String {
    "netmind_documents".to_string()
}

fn default_vector_size() -> usize {
    1536
}

fn default_top_k() -> usize {
    4
}
