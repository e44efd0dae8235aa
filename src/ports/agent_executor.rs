//! Agent Executor Port - Interface to the agent pipeline.
//!
//! The executor is a black box that takes a conversation history,
//! produces a stream of raw execution events while it runs, and reports
//! a final aggregate state once the stream is exhausted. The streaming
//! pipeline consumes both through this port and never couples to a
//! concrete pipeline implementation.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

use crate::domain::agent::{AgentFinalState, ExecutionEvent};
use crate::domain::session::Message;

/// Stream of raw execution events for one query.
///
/// A stream-item error is terminal: no further events follow it.
pub type ExecutionEventStream =
    Pin<Box<dyn Stream<Item = Result<ExecutionEvent, ExecutorError>> + Send>>;

/// Port for agent pipeline execution.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Starts a run over the conversation history and returns its raw
    /// event stream.
    async fn stream_events(
        &self,
        messages: &[Message],
    ) -> Result<ExecutionEventStream, ExecutorError>;

    /// Resolves the final aggregate state for the same history, called
    /// after the event stream is exhausted.
    async fn final_state(&self, messages: &[Message]) -> Result<AgentFinalState, ExecutorError>;
}

/// Agent executor errors.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// Context retrieval (embedding or vector search) failed.
    #[error("retrieval failed: {message}")]
    RetrievalFailed { message: String },

    /// Answer generation failed.
    #[error("completion failed: {message}")]
    CompletionFailed { message: String },

    /// The pipeline failed for another reason.
    #[error("execution failed: {message}")]
    Internal { message: String },
}

impl ExecutorError {
    /// Creates a retrieval failure.
    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::RetrievalFailed {
            message: message.into(),
        }
    }

    /// Creates a completion failure.
    pub fn completion(message: impl Into<String>) -> Self {
        Self::CompletionFailed {
            message: message.into(),
        }
    }

    /// Creates an internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable category name, used as the `type` field of client error
    /// frames.
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutorError::RetrievalFailed { .. } => "RetrievalError",
            ExecutorError::CompletionFailed { .. } => "CompletionError",
            ExecutorError::Internal { .. } => "ExecutorError",
        }
    }
}
