//! HTTP handlers for document endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::handlers::{
    DeleteDocumentError, DeleteDocumentHandler, IngestDocumentCommand, IngestDocumentHandler,
    IngestError,
};
use crate::domain::document::DocumentId;
use crate::ports::DocumentRepository;

use super::dto::{DeleteResponse, DocumentRecord, ErrorResponse, FileListResponse, UploadResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application state for document endpoints.
#[derive(Clone)]
pub struct FilesAppState {
    /// Ingestion pipeline (injected)
    pub ingest_handler: Arc<IngestDocumentHandler>,
    /// Deletion pipeline (injected)
    pub delete_handler: Arc<DeleteDocumentHandler>,
    /// Metadata records, for listing
    pub repository: Arc<dyn DocumentRepository>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/files - Upload and index a document
pub async fn upload_document(
    State(state): State<FilesAppState>,
    mut multipart: Multipart,
) -> Response {
    let upload = loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let Some(filename) = field.file_name().map(String::from) else {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse::bad_request("file field carries no filename")),
                    )
                        .into_response();
                };
                match field.bytes().await {
                    Ok(bytes) => break (filename, bytes.to_vec()),
                    Err(e) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse::bad_request(format!(
                                "failed to read upload: {}",
                                e
                            ))),
                        )
                            .into_response()
                    }
                }
            }
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request("multipart field 'file' is required")),
                )
                    .into_response()
            }
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(format!("invalid multipart body: {}", e))),
                )
                    .into_response()
            }
        }
    };

    let command = IngestDocumentCommand {
        filename: upload.0,
        bytes: upload.1,
    };

    match state.ingest_handler.handle(command).await {
        Ok(document) => {
            (StatusCode::CREATED, Json(UploadResponse::indexed(&document))).into_response()
        }
        Err(e) => handle_ingest_error(e),
    }
}

/// GET /api/files - List indexed documents
pub async fn list_documents(State(state): State<FilesAppState>) -> Response {
    match state.repository.list().await {
        Ok(documents) => {
            let records: Vec<DocumentRecord> =
                documents.iter().map(DocumentRecord::from_document).collect();
            let total = records.len();
            (
                StatusCode::OK,
                Json(FileListResponse {
                    documents: records,
                    total,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "document listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    }
}

/// DELETE /api/files/:id - Remove a document and its vectors
pub async fn delete_document(
    State(state): State<FilesAppState>,
    Path(id): Path<String>,
) -> Response {
    let document_id = match id.parse::<DocumentId>() {
        Ok(document_id) => document_id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("invalid document id")),
            )
                .into_response()
        }
    };

    match state.delete_handler.handle(document_id).await {
        Ok(document) => {
            (StatusCode::OK, Json(DeleteResponse::deleted(&document))).into_response()
        }
        Err(DeleteDocumentError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("document '{}' not found", id))),
        )
            .into_response(),
        Err(DeleteDocumentError::Repository(message)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_ingest_error(error: IngestError) -> Response {
    match error {
        IngestError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        other => {
            error!(error = %other, "document ingestion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(other.to_string())),
            )
                .into_response()
        }
    }
}
