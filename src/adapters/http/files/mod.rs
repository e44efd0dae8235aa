//! HTTP adapter for document endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{DeleteResponse, DocumentRecord, ErrorResponse, FileListResponse, UploadResponse};
pub use handlers::FilesAppState;
pub use routes::{files_router, files_routes};
