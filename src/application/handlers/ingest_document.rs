//! Document ingestion handler.
//!
//! Takes one uploaded file through the whole indexing pipeline: format
//! validation, raw byte storage, chunking, embedding, vector upsert,
//! and the metadata record. Only plain-text formats are accepted; the
//! knowledge base is built from runbooks and postmortems, not binaries.

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::document::{split_text, Document, DocumentChunk};
use crate::domain::foundation::ValidationError;
use crate::ports::{DocumentRepository, DocumentStorage, EmbeddingGenerator, VectorIndex};

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// Command to ingest one uploaded document.
#[derive(Debug, Clone)]
pub struct IngestDocumentCommand {
    /// Original filename, as uploaded.
    pub filename: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Chunking parameters for ingestion.
#[derive(Debug, Clone, Copy)]
pub struct IngestDocumentConfig {
    /// Characters per chunk.
    pub chunk_size: usize,
    /// Characters shared between adjacent chunks.
    pub chunk_overlap: usize,
}

impl Default for IngestDocumentConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Errors from the ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The upload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Raw byte storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Embedding the chunks failed.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The vector index rejected the chunks.
    #[error("index error: {0}")]
    Index(String),

    /// The metadata record could not be written.
    #[error("repository error: {0}")]
    Repository(String),
}

/// Handler for document uploads.
pub struct IngestDocumentHandler {
    storage: Arc<dyn DocumentStorage>,
    repository: Arc<dyn DocumentRepository>,
    embeddings: Arc<dyn EmbeddingGenerator>,
    index: Arc<dyn VectorIndex>,
    config: IngestDocumentConfig,
}

impl IngestDocumentHandler {
    /// Creates a new ingestion handler.
    pub fn new(
        storage: Arc<dyn DocumentStorage>,
        repository: Arc<dyn DocumentRepository>,
        embeddings: Arc<dyn EmbeddingGenerator>,
        index: Arc<dyn VectorIndex>,
        config: IngestDocumentConfig,
    ) -> Self {
        Self {
            storage,
            repository,
            embeddings,
            index,
            config,
        }
    }

    /// Handles an ingestion command, returning the indexed document.
    pub async fn handle(&self, command: IngestDocumentCommand) -> Result<Document, IngestError> {
        // 1. Validate format and decode
        let text = validate_upload(&command.filename, &command.bytes)?;

        // 2. Chunk the text
        let chunk_texts = split_text(text, self.config.chunk_size, self.config.chunk_overlap);
        if chunk_texts.is_empty() {
            return Err(ValidationError::empty_field("file").into());
        }

        // 3. Create the record and persist the raw bytes
        let document = Document::new(&command.filename, chunk_texts.len())?;
        self.storage
            .store(document.id(), &command.filename, &command.bytes)
            .await
            .map_err(|error| IngestError::Storage(error.to_string()))?;

        // 4. Embed all chunks in one batch
        let vectors = self
            .embeddings
            .embed(&chunk_texts)
            .await
            .map_err(|error| IngestError::Embedding(error.to_string()))?;

        // 5. Upsert into the vector index
        let chunks: Vec<DocumentChunk> = chunk_texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| DocumentChunk {
                document_id: document.id(),
                index,
                text,
            })
            .collect();
        self.index
            .ensure_collection()
            .await
            .map_err(|error| IngestError::Index(error.to_string()))?;
        self.index
            .upsert_chunks(&chunks, &vectors)
            .await
            .map_err(|error| IngestError::Index(error.to_string()))?;

        // 6. Record the metadata
        self.repository
            .save(&document)
            .await
            .map_err(|error| IngestError::Repository(error.to_string()))?;

        info!(
            document = %document.id(),
            filename = %document.filename(),
            chunks = document.chunk_count(),
            "document indexed"
        );
        Ok(document)
    }
}

fn validate_upload<'a>(filename: &str, bytes: &'a [u8]) -> Result<&'a str, IngestError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::invalid_format(
            "filename",
            format!(
                "unsupported file type '.{}', expected one of: .txt, .md, .markdown",
                extension
            ),
        )
        .into());
    }

    if bytes.is_empty() {
        return Err(ValidationError::empty_field("file").into());
    }

    std::str::from_utf8(bytes).map_err(|_| {
        ValidationError::invalid_format("file", "file content must be UTF-8 text").into()
    })
}
