//! Document deletion handler.
//!
//! Removes a document from all three places it lives: the metadata
//! record, the stored file, and the vector index. The record is
//! deleted first so concurrent deletes resolve to a single winner;
//! cleanup failures after that are logged and do not fail the request.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::document::{Document, DocumentId};
use crate::ports::{DocumentRepository, DocumentStorage, RepositoryError, VectorIndex};

/// Errors from document deletion.
#[derive(Debug, Clone, Error)]
pub enum DeleteDocumentError {
    /// No document exists for the id.
    #[error("document '{0}' not found")]
    NotFound(DocumentId),

    /// The metadata store failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for DeleteDocumentError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(id) => DeleteDocumentError::NotFound(id),
            RepositoryError::Internal(message) => DeleteDocumentError::Repository(message),
        }
    }
}

/// Handler for document deletion.
pub struct DeleteDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
    storage: Arc<dyn DocumentStorage>,
    index: Arc<dyn VectorIndex>,
}

impl DeleteDocumentHandler {
    /// Creates a new deletion handler.
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        storage: Arc<dyn DocumentStorage>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            repository,
            storage,
            index,
        }
    }

    /// Deletes a document everywhere, returning its last record.
    pub async fn handle(&self, id: DocumentId) -> Result<Document, DeleteDocumentError> {
        // 1. Claim the record; a missing record means nothing to do
        let document = self.repository.delete(id).await?;

        // 2. Best-effort cleanup of bytes and vectors
        if let Err(error) = self.storage.remove(id, document.filename()).await {
            warn!(document = %id, error = %error, "stored file removal failed");
        }
        if let Err(error) = self.index.delete_document(id).await {
            warn!(document = %id, error = %error, "vector removal failed");
        }

        info!(document = %id, filename = %document.filename(), "document deleted");
        Ok(document)
    }
}
