//! Document Repository Port - Interface for document metadata records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::document::{Document, DocumentId};

/// Port for document metadata persistence.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Stores a new document record.
    async fn save(&self, document: &Document) -> Result<(), RepositoryError>;

    /// Finds a document by id.
    async fn find(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError>;

    /// Lists all documents, most recently uploaded first.
    async fn list(&self) -> Result<Vec<Document>, RepositoryError>;

    /// Removes a document record, returning it.
    async fn delete(&self, id: DocumentId) -> Result<Document, RepositoryError>;
}

/// Document repository errors.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// No record exists for the id.
    #[error("document '{0}' not found")]
    NotFound(DocumentId),

    /// The backing store failed.
    #[error("repository error: {0}")]
    Internal(String),
}
