//! Document Storage Port - Interface for raw uploaded file bytes.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::document::DocumentId;

/// Port for raw document byte storage.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Persists the uploaded bytes and returns the stored path.
    async fn store(
        &self,
        document_id: DocumentId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError>;

    /// Removes the stored file. Removing a file that is already gone is
    /// not an error.
    async fn remove(&self, document_id: DocumentId, filename: &str) -> Result<(), StorageError>;
}

/// Document storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The filename cannot be stored safely.
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the port stays object safe.
    fn _assert_object_safe(_: &dyn DocumentStorage) {}

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}
