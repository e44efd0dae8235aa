//! HTTP DTOs for document endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub filename: String,
    pub status: String,
    pub chunk_count: usize,
    pub uploaded_at: String,
}

impl UploadResponse {
    pub fn indexed(document: &Document) -> Self {
        Self {
            document_id: document.id().to_string(),
            filename: document.filename().to_string(),
            status: "indexed".to_string(),
            chunk_count: document.chunk_count(),
            uploaded_at: document.uploaded_at().to_rfc3339(),
        }
    }
}

/// One document in the list response.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub document_id: String,
    pub filename: String,
    pub chunk_count: usize,
    pub uploaded_at: String,
}

impl DocumentRecord {
    pub fn from_document(document: &Document) -> Self {
        Self {
            document_id: document.id().to_string(),
            filename: document.filename().to_string(),
            chunk_count: document.chunk_count(),
            uploaded_at: document.uploaded_at().to_rfc3339(),
        }
    }
}

/// Response listing all indexed documents.
#[derive(Debug, Clone, Serialize)]
pub struct FileListResponse {
    pub documents: Vec<DocumentRecord>,
    pub total: usize,
}

/// Response for a successful deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub status: String,
    pub document_id: String,
    pub filename: String,
}

impl DeleteResponse {
    pub fn deleted(document: &Document) -> Self {
        Self {
            status: "deleted".to_string(),
            document_id: document.id().to_string(),
            filename: document.filename().to_string(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal_error".to_string(),
            message: message.into(),
        }
    }
}
