//! [`ChatModel`] backed by OpenAI's chat completions endpoint.
//!
//! One-shot completions retry transient failures with exponential
//! backoff. Streaming completions consume the endpoint's Server-Sent
//! Events: bytes are buffered per line so a `data:` frame split across
//! network chunks still parses, and the `[DONE]` marker ends the stream.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::ports::{
    ChatCompletion, ChatDelta, ChatDeltaStream, ChatMessage, ChatModel, ChatModelError,
    ChatRequest, ChatRole,
};

/// Settings for the chat completions adapter. Defaults target the
/// public OpenAI API with `gpt-4o-mini`; override the base URL for
/// proxies or compatible gateways.
#[derive(Debug, Clone)]
pub struct OpenAiChatConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl OpenAiChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
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

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI chat completion adapter.
pub struct OpenAiChatModel {
    config: OpenAiChatConfig,
    client: Client,
}

impl OpenAiChatModel {
    /// Creates a new chat model adapter with the given configuration.
    pub fn new(config: OpenAiChatConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn chat_endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn to_api_request(&self, request: &ChatRequest, stream: bool) -> ApiRequest {
        ApiRequest {
            model: self.config.model.clone(),
            messages: request.messages.iter().map(ApiMessage::from_chat).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: stream.then_some(true),
        }
    }

    async fn send_request(
        &self,
        request: &ChatRequest,
        stream: bool,
    ) -> Result<Response, ChatModelError> {
        let api_request = self.to_api_request(request, stream);

        self.client
            .post(self.chat_endpoint())
            .bearer_auth(self.config.api_key())
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatModelError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ChatModelError::network(format!("connection failed: {}", e))
                } else {
                    ChatModelError::network(e.to_string())
                }
            })
    }

    async fn check_status(&self, response: Response) -> Result<Response, ChatModelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            400 => ChatModelError::InvalidRequest(body),
            401 => ChatModelError::AuthenticationFailed,
            429 => ChatModelError::rate_limited(parse_retry_after(&body)),
            500..=599 => {
                ChatModelError::unavailable(format!("upstream error {}: {}", status, body))
            }
            _ => ChatModelError::network(format!("unexpected status {}: {}", status, body)),
        })
    }

    async fn parse_response(&self, response: Response) -> Result<ChatCompletion, ChatModelError> {
        let response = self.check_status(response).await?;

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ChatModelError::parse(format!("failed to parse response: {}", e)))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatModelError::parse("no choices in response"))?;

        Ok(ChatCompletion {
            content: choice.message.content,
            model: api_response.model,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ChatModelError> {
        let mut attempt = 0;
        loop {
            let outcome = match self.send_request(&request, false).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match outcome {
                Ok(completion) => return Ok(completion),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    // Backoff doubles per attempt: 1s, 2s, 4s, ...
                    let delay = Duration::from_secs(1 << attempt);
                    debug!(
                        attempt = attempt + 1,
                        delay_secs = delay.as_secs(),
                        "retrying completion"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn stream_complete(&self, request: ChatRequest) -> Result<ChatDeltaStream, ChatModelError> {
        let response = self.send_request(&request, true).await?;
        let response = self.check_status(response).await?;

        let deltas = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ChatModelError::network(format!("stream error: {}", e))))
            .scan(String::new(), |buffer, chunk| {
                let parsed = match chunk {
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        drain_sse_lines(buffer)
                    }
                    Err(e) => vec![Err(e)],
                };
                futures::future::ready(Some(parsed))
            })
            .flat_map(stream::iter);

        Ok(Box::pin(deltas))
    }
}

/// Pops every complete line off the buffer and parses it.
fn drain_sse_lines(buffer: &mut String) -> Vec<Result<ChatDelta, ChatModelError>> {
    let mut results = Vec::new();
    while let Some(newline) = buffer.find('\n') {
        let line: String = buffer.drain(..=newline).collect();
        results.extend(parse_sse_line(line.trim_end()));
    }
    results
}

/// Parses one SSE line into zero or more deltas.
fn parse_sse_line(line: &str) -> Vec<Result<ChatDelta, ChatModelError>> {
    let mut results = Vec::new();

    let Some(data) = line.strip_prefix("data: ") else {
        return results;
    };
    if data == "[DONE]" {
        return results;
    }

    match serde_json::from_str::<StreamResponseChunk>(data) {
        Ok(chunk) => {
            if let Some(choice) = chunk.choices.first() {
                if let Some(ref content) = choice.delta.content {
                    if !content.is_empty() {
                        results.push(Ok(ChatDelta::content(content)));
                    }
                }
                if let Some(ref reason) = choice.finish_reason {
                    results.push(Ok(ChatDelta::finished(reason.clone())));
                }
            }
        }
        Err(e) => {
            if !data.trim().is_empty() {
                results.push(Err(ChatModelError::parse(format!(
                    "failed to parse stream chunk: {}",
                    e
                ))));
            }
        }
    }

    results
}

/// Pulls the "try again in Ns" hint out of a 429 body, when present.
fn parse_retry_after(error_body: &str) -> u32 {
    const DEFAULT_SECS: u32 = 30;

    let parsed: serde_json::Value = match serde_json::from_str(error_body) {
        Ok(value) => value,
        Err(_) => return DEFAULT_SECS,
    };
    let message = parsed["error"]["message"].as_str().unwrap_or_default();
    let Some(rest) = message.split("try again in ").nth(1) else {
        return DEFAULT_SECS;
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(DEFAULT_SECS)
}

// Wire types for the chat completions endpoint.

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

impl ApiMessage {
    fn from_chat(message: &ChatMessage) -> Self {
        Self {
            role: match message.role {
                ChatRole::System => "system",
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            }
            .to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct StreamResponseChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}
