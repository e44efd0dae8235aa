//! Chat Model Port - Interface for LLM chat completions.
//!
//! Abstracts the chat completion provider behind the agent pipeline,
//! supporting both one-shot completions and token streaming.

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

/// Stream of completion deltas as they arrive from the provider.
pub type ChatDeltaStream = Pin<Box<dyn Stream<Item = Result<ChatDelta, ChatModelError>> + Send>>;

/// Port for chat completion providers.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a single completion (non-streaming).
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ChatModelError>;

    /// Generate a streaming completion, yielding deltas as they arrive.
    async fn stream_complete(&self, request: ChatRequest) -> Result<ChatDeltaStream, ChatModelError>;
}

/// Request for a chat completion.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Conversation messages (system prompt + history + current query).
    pub messages: Vec<ChatMessage>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Adds a message.
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// A message in the completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a completion request message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Response from a non-streaming completion.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    /// Generated content.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

/// Streaming chunk from a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatDelta {
    /// New content in this chunk (may be empty on the final chunk).
    pub content: String,
    /// Why the model stopped, present only on the final chunk.
    pub finish_reason: Option<String>,
}

impl ChatDelta {
    /// Creates a content chunk.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: None,
        }
    }

    /// Creates a final chunk.
    pub fn finished(reason: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            finish_reason: Some(reason.into()),
        }
    }
}

/// Chat model errors.
#[derive(Debug, Clone, Error)]
pub enum ChatModelError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// The provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl ChatModelError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChatModelError::RateLimited { .. }
                | ChatModelError::Unavailable { .. }
                | ChatModelError::Network(_)
                | ChatModelError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the port stays object safe.
    fn _assert_object_safe(_: &dyn ChatModel) {}

    #[test]
    fn request_builder_collects_messages() {
        let request = ChatRequest::new()
            .with_message(ChatMessage::system("be terse"))
            .with_message(ChatMessage::user("hello"))
            .with_temperature(0.2)
            .with_max_tokens(256);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(256));
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn delta_constructors_work() {
        let chunk = ChatDelta::content("Hel");
        assert_eq!(chunk.content, "Hel");
        assert!(chunk.finish_reason.is_none());

        let done = ChatDelta::finished("stop");
        assert!(done.content.is_empty());
        assert_eq!(done.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn retryable_classification() {
        assert!(ChatModelError::rate_limited(30).is_retryable());
        assert!(ChatModelError::unavailable("down").is_retryable());
        assert!(ChatModelError::network("reset").is_retryable());
        assert!(ChatModelError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!ChatModelError::AuthenticationFailed.is_retryable());
        assert!(!ChatModelError::parse("bad json").is_retryable());
        assert!(!ChatModelError::InvalidRequest("empty".into()).is_retryable());
    }
}
