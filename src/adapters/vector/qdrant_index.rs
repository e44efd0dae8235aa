//! Qdrant Vector Index - Implementation of VectorIndex over Qdrant's REST API.
//!
//! Talks to a Qdrant instance over HTTP. Each chunk becomes one point with
//! a random UUID id and a payload carrying `document_id`, `chunk_index`,
//! and `text`, so deletion can filter on the owning document.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::domain::document::{DocumentChunk, DocumentId};
use crate::ports::{ScoredChunk, VectorIndex, VectorIndexError};

/// Configuration for the Qdrant index adapter.
#[derive(Debug, Clone)]
pub struct QdrantIndexConfig {
    /// Base URL of the Qdrant instance (default: http://localhost:6333).
    pub base_url: String,
    /// Collection holding the document chunks.
    pub collection: String,
    /// Dimension of stored vectors.
    pub vector_size: usize,
    /// Request timeout.
    pub timeout: Duration,
}

impl QdrantIndexConfig {
    /// Creates a configuration for the given collection.
    pub fn new(collection: impl Into<String>, vector_size: usize) -> Self {
        Self {
            base_url: "http://localhost:6333".to_string(),
            collection: collection.into(),
            vector_size,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Qdrant REST adapter.
pub struct QdrantVectorIndex {
    config: QdrantIndexConfig,
    client: Client,
}

impl QdrantVectorIndex {
    /// Creates a new index adapter with the given configuration.
    pub fn new(config: QdrantIndexConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.config.base_url, self.config.collection)
    }

    fn points_url(&self) -> String {
        format!("{}/points", self.collection_url())
    }

    async fn check_status(&self, response: Response) -> Result<Response, VectorIndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            400 | 422 => VectorIndexError::InvalidRequest(error_body),
            500..=599 => VectorIndexError::unavailable(format!(
                "server error {}: {}",
                status, error_body
            )),
            _ => VectorIndexError::network(format!("status {}: {}", status, error_body)),
        })
    }
}

#[async_trait]
impl VectorIndex for QdrantVectorIndex {
    async fn ensure_collection(&self) -> Result<(), VectorIndexError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| VectorIndexError::network(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }
        if response.status() != StatusCode::NOT_FOUND {
            self.check_status(response).await?;
            return Ok(());
        }

        debug!(collection = %self.config.collection, "creating qdrant collection");
        let response = self
            .client
            .put(self.collection_url())
            .json(&collection_body(self.config.vector_size))
            .send()
            .await
            .map_err(|e| VectorIndexError::network(e.to_string()))?;
        self.check_status(response).await?;

        Ok(())
    }

    async fn upsert_chunks(
        &self,
        chunks: &[DocumentChunk],
        vectors: &[Vec<f32>],
    ) -> Result<(), VectorIndexError> {
        if chunks.len() != vectors.len() {
            return Err(VectorIndexError::InvalidRequest(format!(
                "{} chunks, {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }
        if chunks.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .put(format!("{}?wait=true", self.points_url()))
            .json(&points_body(chunks, vectors))
            .send()
            .await
            .map_err(|e| VectorIndexError::network(e.to_string()))?;
        self.check_status(response).await?;

        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, VectorIndexError> {
        let response = self
            .client
            .post(format!("{}/search", self.points_url()))
            .json(&search_body(vector, limit))
            .send()
            .await
            .map_err(|e| VectorIndexError::network(e.to_string()))?;

        // A missing collection means nothing has been ingested yet.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let response = self.check_status(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| VectorIndexError::parse(format!("failed to parse response: {}", e)))?;

        scored_chunks_from(&body)
    }

    async fn delete_document(&self, document_id: DocumentId) -> Result<(), VectorIndexError> {
        let response = self
            .client
            .post(format!("{}/delete?wait=true", self.points_url()))
            .json(&delete_body(document_id))
            .send()
            .await
            .map_err(|e| VectorIndexError::network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        self.check_status(response).await?;

        Ok(())
    }
}

fn collection_body(vector_size: usize) -> Value {
    json!({
        "vectors": {
            "size": vector_size,
            "distance": "Cosine",
        }
    })
}

fn points_body(chunks: &[DocumentChunk], vectors: &[Vec<f32>]) -> Value {
    let points: Vec<Value> = chunks
        .iter()
        .zip(vectors.iter())
        .map(|(chunk, vector)| {
            json!({
                "id": Uuid::new_v4().to_string(),
                "vector": vector,
                "payload": {
                    "document_id": chunk.document_id.to_string(),
                    "chunk_index": chunk.index,
                    "text": chunk.text,
                },
            })
        })
        .collect();

    json!({ "points": points })
}

fn search_body(vector: &[f32], limit: usize) -> Value {
    json!({
        "vector": vector,
        "limit": limit,
        "with_payload": true,
    })
}

fn delete_body(document_id: DocumentId) -> Value {
    json!({
        "filter": {
            "must": [
                {
                    "key": "document_id",
                    "match": { "value": document_id.to_string() },
                }
            ]
        }
    })
}

fn scored_chunks_from(body: &Value) -> Result<Vec<ScoredChunk>, VectorIndexError> {
    let hits = body
        .get("result")
        .and_then(|r| r.as_array())
        .ok_or_else(|| VectorIndexError::parse("missing result array"))?;

    hits.iter()
        .map(|hit| {
            let score = hit
                .get("score")
                .and_then(|s| s.as_f64())
                .ok_or_else(|| VectorIndexError::parse("hit missing score"))?
                as f32;

            let payload = hit
                .get("payload")
                .ok_or_else(|| VectorIndexError::parse("hit missing payload"))?;

            let document_id = payload
                .get("document_id")
                .and_then(|d| d.as_str())
                .ok_or_else(|| VectorIndexError::parse("payload missing document_id"))?
                .parse::<DocumentId>()
                .map_err(|e| VectorIndexError::parse(format!("bad document_id: {}", e)))?;

            let text = payload
                .get("text")
                .and_then(|t| t.as_str())
                .ok_or_else(|| VectorIndexError::parse("payload missing text"))?
                .to_string();

            Ok(ScoredChunk {
                document_id,
                text,
                score,
            })
        })
        .collect()
}
