//! In-Memory Document Repository Adapter
//!
//! Keeps document metadata in a `RwLock<HashMap>`. Records do not survive
//! a restart; the vector index remains the durable copy of chunk data.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::document::{Document, DocumentId};
use crate::ports::{DocumentRepository, RepositoryError};

/// In-memory document metadata store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl InMemoryDocumentRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), RepositoryError> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id(), document.clone());
        Ok(())
    }

    async fn find(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Document>, RepositoryError> {
        let documents = self.documents.read().await;
        let mut all: Vec<Document> = documents.values().cloned().collect();
        all.sort_by(|a, b| b.uploaded_at().cmp(&a.uploaded_at()));
        Ok(all)
    }

    async fn delete(&self, id: DocumentId) -> Result<Document, RepositoryError> {
        let mut documents = self.documents.write().await;
        documents.remove(&id).ok_or(RepositoryError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_and_finds_documents() {
        let repo = InMemoryDocumentRepository::new();
        let doc = Document::new("runbook.md", 4).unwrap();

        repo.save(&doc).await.unwrap();

        let found = repo.find(doc.id()).await.unwrap();
        assert_eq!(found, Some(doc));
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_id() {
        let repo = InMemoryDocumentRepository::new();
        assert_eq!(repo.find(DocumentId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let repo = InMemoryDocumentRepository::new();

        let first = Document::new("first.txt", 1).unwrap();
        repo.save(&first).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = Document::new("second.txt", 1).unwrap();
        repo.save(&second).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].filename(), "second.txt");
        assert_eq!(all[1].filename(), "first.txt");
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let repo = InMemoryDocumentRepository::new();
        let doc = Document::new("gone.txt", 2).unwrap();
        repo.save(&doc).await.unwrap();

        let removed = repo.delete(doc.id()).await.unwrap();
        assert_eq!(removed, doc);
        assert_eq!(repo.find(doc.id()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found() {
        let repo = InMemoryDocumentRepository::new();
        let doc = Document::new("once.txt", 1).unwrap();
        repo.save(&doc).await.unwrap();

        repo.delete(doc.id()).await.unwrap();
        let second = repo.delete(doc.id()).await;
        assert!(matches!(second, Err(RepositoryError::NotFound(id)) if id == doc.id()));
    }

    #[tokio::test]
    async fn save_overwrites_existing_record() {
        let repo = InMemoryDocumentRepository::new();
        let doc = Document::new("doc.txt", 1).unwrap();
        repo.save(&doc).await.unwrap();
        repo.save(&doc).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
