//! Local Document Storage Adapter
//!
//! Stores uploaded document bytes on the local filesystem, one file per
//! document, prefixed with the document id so name collisions cannot
//! overwrite earlier uploads.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::document::DocumentId;
use crate::ports::{DocumentStorage, StorageError};

/// Filesystem storage for uploaded documents.
#[derive(Debug, Clone)]
pub struct LocalDocumentStorage {
    root: PathBuf,
}

impl LocalDocumentStorage {
    /// Creates storage rooted at the given directory. The directory is
    /// created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn stored_path(&self, document_id: DocumentId, filename: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(stored_filename(document_id, filename)?))
    }
}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    async fn store(
        &self,
        document_id: DocumentId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let path = self.stored_path(document_id, filename)?;

        fs::create_dir_all(&self.root).await?;
        fs::write(&path, bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "stored document");
        Ok(path)
    }

    async fn remove(&self, document_id: DocumentId, filename: &str) -> Result<(), StorageError> {
        let path = self.stored_path(document_id, filename)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Builds the on-disk name, stripping any path components from the
/// client-supplied filename.
fn stored_filename(document_id: DocumentId, filename: &str) -> Result<String, StorageError> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(StorageError::InvalidFilename(filename.to_string()));
    }

    Ok(format!("{}_{}", document_id, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn stores_and_removes_a_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDocumentStorage::new(dir.path());
        let id = DocumentId::new();

        let path = storage.store(id, "runbook.md", b"content").await.unwrap();
        assert!(path.exists());
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"content");

        storage.remove(id, "runbook.md").await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn creates_root_directory_on_first_store() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("uploads").join("docs");
        let storage = LocalDocumentStorage::new(&nested);

        let path = storage.store(DocumentId::new(), "a.txt", b"x").await.unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn removing_a_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDocumentStorage::new(dir.path());

        assert!(storage.remove(DocumentId::new(), "gone.txt").await.is_ok());
    }

    #[tokio::test]
    async fn strips_path_components_from_filenames() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDocumentStorage::new(dir.path());
        let id = DocumentId::new();

        let path = storage
            .store(id, "../../etc/passwd", b"not today")
            .await
            .unwrap();

        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("{}_passwd", id)
        );
    }

    #[tokio::test]
    async fn rejects_filenames_without_a_basename() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDocumentStorage::new(dir.path());

        let result = storage.store(DocumentId::new(), "..", b"x").await;
        assert!(matches!(result, Err(StorageError::InvalidFilename(_))));
    }

    #[test]
    fn same_basename_different_documents_do_not_collide() {
        let a = stored_filename(DocumentId::new(), "notes.txt").unwrap();
        let b = stored_filename(DocumentId::new(), "notes.txt").unwrap();
        assert_ne!(a, b);
    }
}
