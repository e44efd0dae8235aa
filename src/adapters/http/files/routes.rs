//! Axum router configuration for document endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{delete_document, list_documents, upload_document, FilesAppState};

/// Create the files API router.
///
/// # Routes
///
/// - `POST /` - Upload and index a document (multipart, field `file`)
/// - `GET /` - List indexed documents
/// - `DELETE /:id` - Remove a document and its vectors
pub fn files_routes() -> Router<FilesAppState> {
    Router::new()
        .route("/", post(upload_document))
        .route("/", get(list_documents))
        .route("/:id", delete(delete_document))
}

/// Create the complete files module router.
///
/// Suitable for mounting at `/api/files`.
pub fn files_router() -> Router<FilesAppState> {
    files_routes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = files_routes();
    }
}
