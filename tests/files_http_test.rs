//! Integration tests for the document HTTP endpoints.
//!
//! These tests drive the full router through tower and verify:
//! 1. Multipart uploads run the whole ingestion pipeline
//! 2. Listing reflects the metadata records
//! 3. Deletion removes the record, the stored file, and the vectors
//! 4. Malformed uploads and unknown ids map to HTTP errors

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use netmind::adapters::http::{files_router, FilesAppState};
use netmind::adapters::storage::{InMemoryDocumentRepository, LocalDocumentStorage};
use netmind::application::handlers::{
    DeleteDocumentHandler, IngestDocumentConfig, IngestDocumentHandler,
};
use netmind::domain::document::{DocumentChunk, DocumentId};
use netmind::ports::{
    DocumentRepository, DocumentStorage, EmbeddingError, EmbeddingGenerator, ScoredChunk,
    VectorIndex, VectorIndexError,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Embedding generator that returns fixed-dimension vectors.
struct FixedEmbeddings {
    dimension: usize,
}

#[async_trait]
impl EmbeddingGenerator for FixedEmbeddings {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|_| vec![0.1; self.dimension]).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Vector index that records upserts and deletions.
#[derive(Default)]
struct RecordingIndex {
    upserted: Mutex<Vec<(DocumentId, usize)>>,
    deleted: Mutex<Vec<DocumentId>>,
}

#[async_trait]
impl VectorIndex for RecordingIndex {
    async fn ensure_collection(&self) -> Result<(), VectorIndexError> {
        Ok(())
    }

    async fn upsert_chunks(
        &self,
        chunks: &[DocumentChunk],
        vectors: &[Vec<f32>],
    ) -> Result<(), VectorIndexError> {
        assert_eq!(chunks.len(), vectors.len());
        if let Some(first) = chunks.first() {
            self.upserted
                .lock()
                .unwrap()
                .push((first.document_id, chunks.len()));
        }
        Ok(())
    }

    async fn search(
        &self,
        _vector: &[f32],
        _limit: usize,
    ) -> Result<Vec<ScoredChunk>, VectorIndexError> {
        Ok(Vec::new())
    }

    async fn delete_document(&self, document_id: DocumentId) -> Result<(), VectorIndexError> {
        self.deleted.lock().unwrap().push(document_id);
        Ok(())
    }
}

struct TestApp {
    router: Router,
    index: Arc<RecordingIndex>,
    upload_dir: tempfile::TempDir,
}

fn app() -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn DocumentStorage> =
        Arc::new(LocalDocumentStorage::new(upload_dir.path().to_path_buf()));
    let repository: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());
    let embeddings: Arc<dyn EmbeddingGenerator> = Arc::new(FixedEmbeddings { dimension: 8 });
    let index = Arc::new(RecordingIndex::default());
    let index_port: Arc<dyn VectorIndex> = index.clone();

    let state = FilesAppState {
        ingest_handler: Arc::new(IngestDocumentHandler::new(
            Arc::clone(&storage),
            Arc::clone(&repository),
            embeddings,
            Arc::clone(&index_port),
            IngestDocumentConfig {
                chunk_size: 64,
                chunk_overlap: 16,
            },
        )),
        delete_handler: Arc::new(DeleteDocumentHandler::new(
            Arc::clone(&repository),
            storage,
            index_port,
        )),
        repository,
    };

    TestApp {
        router: files_router().with_state(state),
        index,
        upload_dir,
    }
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn multipart_upload(filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/plain\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const RUNBOOK: &[u8] = b"# Link flap runbook\n\n\
When a link flaps, check the optic light levels first. \
Replace the SFP when receive power is below -14 dBm. \
Escalate to the on-call network engineer after two replacements.";

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn upload_ingests_and_returns_the_record() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(multipart_upload("runbook.md", RUNBOOK))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["filename"], "runbook.md");
    assert_eq!(body["status"], "indexed");
    assert!(body["chunk_count"].as_u64().unwrap() > 1);
    assert!(body["document_id"].as_str().unwrap().parse::<DocumentId>().is_ok());
}

#[tokio::test]
async fn upload_stores_the_raw_file_and_upserts_vectors() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(multipart_upload("runbook.md", RUNBOOK))
        .await
        .unwrap();
    let body = body_json(response).await;
    let chunk_count = body["chunk_count"].as_u64().unwrap() as usize;

    let stored: Vec<String> = std::fs::read_dir(app.upload_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].ends_with("_runbook.md"));

    let upserted = app.index.upserted.lock().unwrap();
    assert_eq!(upserted.len(), 1);
    assert_eq!(upserted[0].1, chunk_count);
}

#[tokio::test]
async fn upload_of_unsupported_file_type_is_rejected() {
    let app = app();

    let response = app
        .router
        .oneshot(multipart_upload("firmware.bin", b"\x7fELF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("unsupported file type"));
}

#[tokio::test]
async fn upload_of_empty_file_is_rejected() {
    let app = app();

    let response = app
        .router
        .oneshot(multipart_upload("empty.txt", b""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_without_a_file_field_is_rejected() {
    let app = app();

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"comment\"\r\n\r\nnot a file",
    );
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("file"));
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn listing_reflects_uploads() {
    let app = app();

    let response = app.router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);

    app.router
        .clone()
        .oneshot(multipart_upload("runbook.md", RUNBOOK))
        .await
        .unwrap();
    app.router
        .clone()
        .oneshot(multipart_upload("topology.txt", b"Spine-leaf, two spines."))
        .await
        .unwrap();

    let response = app.router.oneshot(get("/")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["documents"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn delete_removes_record_file_and_vectors() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(multipart_upload("runbook.md", RUNBOOK))
        .await
        .unwrap();
    let uploaded = body_json(response).await;
    let id = uploaded["document_id"].as_str().unwrap().to_string();

    let response = app
        .router
        .clone()
        .oneshot(delete(&format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "deleted");
    assert_eq!(body["document_id"], id.as_str());
    assert_eq!(body["filename"], "runbook.md");

    // Record gone
    let response = app.router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(body_json(response).await["total"], 0);

    // File gone
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).unwrap().count(), 0);

    // Vectors gone
    let deleted = app.index.deleted.lock().unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].to_string(), id);
}

#[tokio::test]
async fn deleting_an_unknown_document_returns_404() {
    let app = app();

    let id = DocumentId::new();
    let response = app.router.oneshot(delete(&format!("/{id}"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn deleting_with_a_malformed_id_returns_400() {
    let app = app();

    let response = app.router.oneshot(delete("/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}
