//! Document ingestion configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Ingestion pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IngestionConfig {
    /// Directory where uploaded files are stored
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl IngestionConfig {
    /// Validate ingestion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chunk_size == 0 {
            return Err(ValidationError::InvalidChunkSize);
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ValidationError::InvalidChunkOverlap);
        }
        Ok(())
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}
