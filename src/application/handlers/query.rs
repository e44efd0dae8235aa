//! Non-streaming query handler.
//!
//! Same validation and session semantics as the streaming path, but
//! runs the executor to completion and returns the aggregate answer in
//! one response. The resolved answer is folded back into the session
//! so follow-up queries see it in context.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::ValidationError;
use crate::domain::session::{Message, Role, SessionKey, UserKey};
use crate::ports::{AgentExecutor, ExecutorError, SessionStore, SessionStoreError};

use super::stream_query::{latest_user_content, IncomingMessage};

/// Command to run a query to completion.
#[derive(Debug, Clone)]
pub struct QueryCommand {
    /// Session the query belongs to.
    pub session_key: SessionKey,
    /// Optional user attribution, attached on first sight.
    pub user_key: Option<UserKey>,
    /// Full conversation as sent by the client.
    pub messages: Vec<IncomingMessage>,
}

/// Result of a completed query.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Session the query ran in.
    pub session_key: SessionKey,
    /// Resolved answer text.
    pub answer: String,
    /// Tools invoked during the run.
    pub executed_tools: Vec<String>,
    /// Pipeline steps that ran.
    pub executed_steps: Vec<String>,
}

/// Errors from the non-streaming query path.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// The inbound query failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The session store failed.
    #[error("session error: {0}")]
    Session(String),

    /// The agent pipeline failed.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl From<SessionStoreError> for QueryError {
    fn from(error: SessionStoreError) -> Self {
        match error {
            SessionStoreError::Validation(inner) => QueryError::Validation(inner),
            other => QueryError::Session(other.to_string()),
        }
    }
}

/// Handler for one-shot agent queries.
pub struct QueryHandler {
    sessions: Arc<dyn SessionStore>,
    executor: Arc<dyn AgentExecutor>,
}

impl QueryHandler {
    /// Creates a new query handler.
    pub fn new(sessions: Arc<dyn SessionStore>, executor: Arc<dyn AgentExecutor>) -> Self {
        Self { sessions, executor }
    }

    /// Handles a query command.
    pub async fn handle(&self, command: QueryCommand) -> Result<QueryResult, QueryError> {
        // 1. Validate the inbound query
        let query = latest_user_content(&command.messages)?;

        // 2. Resolve the session and fold the query in (idempotent)
        self.sessions
            .get_or_create(&command.session_key, command.user_key.as_ref())
            .await;
        self.sessions
            .append_message_if_new(&command.session_key, Role::User, &query)
            .await?;

        // 3. Snapshot the context window for the executor
        let history = match self.sessions.get(&command.session_key).await {
            Some(snapshot) => snapshot.messages,
            None => vec![Message::new(Role::User, query)?],
        };

        // 4. Run the pipeline to completion
        let state = self.executor.final_state(&history).await?;
        let answer = state.resolved_answer().to_string();

        // 5. Fold the answer back into the session (idempotent)
        self.sessions
            .append_message_if_new(&command.session_key, Role::Assistant, &answer)
            .await?;
        debug!(session = %command.session_key, answer_chars = answer.len(), "query answered");

        Ok(QueryResult {
            session_key: command.session_key,
            answer,
            executed_tools: state.executed_tools,
            executed_steps: state.executed_steps,
        })
    }
}
