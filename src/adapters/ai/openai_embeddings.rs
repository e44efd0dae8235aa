//! [`EmbeddingGenerator`] backed by OpenAI's `/v1/embeddings` endpoint.
//!
//! Texts are embedded in one batch per call. The response carries one
//! vector per input; vectors are re-sorted by their `index` field so the
//! output order always matches the input order.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{EmbeddingError, EmbeddingGenerator};

/// Settings for the embeddings adapter. `dimension` must agree with the
/// selected model; it is what the vector index collection is sized by.
#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub dimension: usize,
}

impl OpenAiEmbeddingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "text-embedding-3-small".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(60),
            dimension: 1536,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI embedding adapter.
pub struct OpenAiEmbeddingGenerator {
    config: OpenAiEmbeddingConfig,
    client: Client,
}

impl OpenAiEmbeddingGenerator {
    /// Creates a new embedding adapter with the given configuration.
    pub fn new(config: OpenAiEmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.config.base_url)
    }
}

#[async_trait]
impl EmbeddingGenerator for OpenAiEmbeddingGenerator {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Err(EmbeddingError::InvalidRequest(
                "embedding batch is empty".to_string(),
            ));
        }

        let request = EmbeddingRequest {
            model: self.config.model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(self.embeddings_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => EmbeddingError::AuthenticationFailed,
                429 => EmbeddingError::RateLimited {
                    retry_after_secs: 30,
                },
                400 => EmbeddingError::InvalidRequest(error_body),
                _ => EmbeddingError::network(format!("status {}: {}", status, error_body)),
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::parse(format!("failed to parse response: {}", e)))?;

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::parse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        Ok(sort_by_index(parsed.data))
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

/// Restores input order from the per-item `index` field.
fn sort_by_index(mut data: Vec<EmbeddingData>) -> Vec<Vec<f32>> {
    data.sort_by_key(|d| d.index);
    data.into_iter().map(|d| d.embedding).collect()
}

// Wire types for the embeddings endpoint.

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
