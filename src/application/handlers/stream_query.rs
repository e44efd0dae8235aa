//! Streaming query handler.
//!
//! Validates an inbound query, folds it into the session's context
//! window, and runs the agent executor, translating raw execution
//! events into the client event stream delivered over SSE.
//!
//! Stream contract: events are emitted in arrival order; a successful
//! stream ends with `final_response` followed by `done`; any failure
//! ends the stream with a single `error` frame and no `done`.

use async_stream::stream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::agent::{ClientEvent, EventTranslator};
use crate::domain::foundation::ValidationError;
use crate::domain::session::{Message, Role, SessionKey, UserKey};
use crate::ports::{AgentExecutor, ExecutorError, SessionStore, SessionStoreError, StreamObserver};

/// Stream of client events for one query.
pub type ClientEventStream = Pin<Box<dyn Stream<Item = ClientEvent> + Send>>;

/// One inbound conversation message, before domain validation.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Who sent the message.
    pub role: Role,
    /// Raw message text.
    pub content: String,
}

/// Command to run a streaming query.
#[derive(Debug, Clone)]
pub struct StreamQueryCommand {
    /// Session the query belongs to.
    pub session_key: SessionKey,
    /// Optional user attribution, attached on first sight.
    pub user_key: Option<UserKey>,
    /// Full conversation as sent by the client.
    pub messages: Vec<IncomingMessage>,
}

/// Feature flags for the streaming pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamQueryConfig {
    /// Carry the reasoning trace on final responses.
    pub include_thought_chain: bool,
    /// Attach diagnostic tracebacks to error frames.
    pub debug: bool,
}

/// Errors raised before the stream starts.
///
/// Failures after the stream has started are delivered in-band as
/// `error` frames, never through this type.
#[derive(Debug, Clone, Error)]
pub enum StreamQueryError {
    /// The inbound query failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The session store failed.
    #[error("session error: {0}")]
    Session(String),
}

impl From<SessionStoreError> for StreamQueryError {
    fn from(error: SessionStoreError) -> Self {
        match error {
            SessionStoreError::Validation(inner) => StreamQueryError::Validation(inner),
            other => StreamQueryError::Session(other.to_string()),
        }
    }
}

/// Handler for streaming agent queries.
pub struct StreamQueryHandler {
    sessions: Arc<dyn SessionStore>,
    executor: Arc<dyn AgentExecutor>,
    observer: Option<Arc<dyn StreamObserver>>,
    config: StreamQueryConfig,
}

impl StreamQueryHandler {
    /// Creates a new streaming query handler.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        executor: Arc<dyn AgentExecutor>,
        config: StreamQueryConfig,
    ) -> Self {
        Self {
            sessions,
            executor,
            observer: None,
            config,
        }
    }

    /// Attaches an observer to the stream's hook points.
    pub fn with_observer(mut self, observer: Arc<dyn StreamObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Handles a streaming query command.
    ///
    /// Validation and the session update happen before the stream is
    /// handed back, so protocol-level failures map to HTTP errors and
    /// everything after the first frame is in-band.
    pub async fn handle(
        &self,
        command: StreamQueryCommand,
    ) -> Result<ClientEventStream, StreamQueryError> {
        // 1. Validate the inbound query
        let query = latest_user_content(&command.messages)?;

        // 2. Resolve the session and fold the query in (idempotent)
        self.sessions
            .get_or_create(&command.session_key, command.user_key.as_ref())
            .await;
        let appended = self
            .sessions
            .append_message_if_new(&command.session_key, Role::User, &query)
            .await?;
        let active_sessions = self.sessions.session_count().await;
        info!(
            session = %command.session_key,
            appended,
            active_sessions,
            "agent stream starting"
        );

        // 3. Snapshot the context window for the executor
        let history = match self.sessions.get(&command.session_key).await {
            Some(snapshot) => snapshot.messages,
            // Session cleared concurrently; run over the query alone.
            None => vec![Message::new(Role::User, query)?],
        };

        // 4. Build the client event stream
        Ok(self.build_stream(command.session_key, history))
    }

    fn build_stream(&self, session_key: SessionKey, history: Vec<Message>) -> ClientEventStream {
        let executor = Arc::clone(&self.executor);
        let observer = self.observer.clone();
        let config = self.config;

        Box::pin(stream! {
            let mut translator = EventTranslator::new();

            let mut events = match executor.stream_events(&history).await {
                Ok(events) => events,
                Err(error) => {
                    warn!(session = %session_key, error = %error, "executor failed to start");
                    yield error_frame(&error, config.debug);
                    return;
                }
            };

            while let Some(item) = events.next().await {
                match item {
                    Ok(event) => {
                        let Some(client_event) = translator.translate(&event) else {
                            continue;
                        };
                        if let ClientEvent::NodeUpdate { node, status } = &client_event {
                            if let Some(observer) = observer.as_ref() {
                                observer.on_node_update(&session_key, node, *status).await;
                            }
                        }
                        yield client_event;
                    }
                    Err(error) => {
                        warn!(session = %session_key, error = %error, "executor stream failed");
                        yield error_frame(&error, config.debug);
                        return;
                    }
                }
            }

            match executor.final_state(&history).await {
                Ok(state) => {
                    yield state.to_final_response(config.include_thought_chain);
                    if let Some(observer) = observer.as_ref() {
                        observer.on_final_response(&session_key, &state).await;
                    }
                    info!(session = %session_key, "agent stream completed");
                    yield ClientEvent::Done;
                }
                Err(error) => {
                    warn!(session = %session_key, error = %error, "final state resolution failed");
                    yield error_frame(&error, config.debug);
                }
            }
        })
    }
}

/// Extracts the latest user message's content.
///
/// The conversation must hold at least one user message, and the most
/// recent one must have non-blank content.
pub(crate) fn latest_user_content(messages: &[IncomingMessage]) -> Result<String, ValidationError> {
    if messages.is_empty() {
        return Err(ValidationError::empty_field("messages"));
    }
    let latest = messages
        .iter()
        .rev()
        .find(|message| message.role == Role::User)
        .ok_or_else(|| {
            ValidationError::invalid_format("messages", "at least one user message is required")
        })?;
    if latest.content.trim().is_empty() {
        return Err(ValidationError::empty_field("content"));
    }
    Ok(latest.content.clone())
}

fn error_frame(error: &ExecutorError, debug: bool) -> ClientEvent {
    let traceback = debug.then(|| format!("{:?}", error));
    ClientEvent::error(error.to_string(), error.kind(), traceback)
}
