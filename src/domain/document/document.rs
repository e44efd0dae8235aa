//! Document metadata for the ingestion pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

/// Unique identifier for an ingested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new random DocumentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a DocumentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Metadata record for an ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    filename: String,
    chunk_count: usize,
    uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Creates a new document record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the filename is empty.
    pub fn new(filename: impl Into<String>, chunk_count: usize) -> Result<Self, ValidationError> {
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(ValidationError::empty_field("filename"));
        }

        Ok(Self {
            id: DocumentId::new(),
            filename,
            chunk_count,
            uploaded_at: Utc::now(),
        })
    }

    /// Returns the document identifier.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the original filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the number of chunks indexed for this document.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Returns when the document was uploaded.
    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}

/// One embeddable slice of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    /// Document the chunk belongs to.
    pub document_id: DocumentId,
    /// Zero-based position within the document.
    pub index: usize,
    /// Chunk text.
    pub text: String,
}
