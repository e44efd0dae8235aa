//! Session Store Port - Interface for conversational session state.
//!
//! Maps a caller-supplied session key to a session and its ordered
//! context window, synchronizing concurrent access per key. Appends
//! carry the idempotent duplicate guard, so client retries of the same
//! request never duplicate entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::session::{Message, Role, SessionKey, UserKey};

/// Port for session state access.
///
/// Implementations must serialize operations per session key; operations
/// on distinct keys are independent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `key`, creating an empty one on first
    /// reference. When `user_key` is supplied and the session has no
    /// user key yet, it is attached; an existing user key is never
    /// overwritten. This operation does not fail.
    async fn get_or_create(
        &self,
        key: &SessionKey,
        user_key: Option<&UserKey>,
    ) -> SessionSnapshot;

    /// Appends a message unless it duplicates the most recent message
    /// with the same role. Returns whether a message was appended.
    async fn append_message_if_new(
        &self,
        key: &SessionKey,
        role: Role,
        content: &str,
    ) -> Result<bool, SessionStoreError>;

    /// Snapshot of an existing session, or `None` for an unseen key.
    async fn get(&self, key: &SessionKey) -> Option<SessionSnapshot>;

    /// Removes a session and its context window. Returns whether the
    /// session existed.
    async fn clear(&self, key: &SessionKey) -> bool;

    /// Number of live sessions, for operational logging.
    async fn session_count(&self) -> usize;
}

/// Point-in-time copy of a session's state.
///
/// Handed across the async boundary instead of a live aggregate so no
/// lock is held while the caller works with the data.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// The session key.
    pub session_key: SessionKey,
    /// Attached user key, if any.
    pub user_key: Option<UserKey>,
    /// Ordered context window at snapshot time.
    pub messages: Vec<Message>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session last accepted an append.
    pub last_active_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Number of messages in the context window.
    pub fn context_length(&self) -> usize {
        self.messages.len()
    }
}

/// Session store errors.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// The session disappeared between resolution and mutation.
    #[error("session '{0}' not found")]
    SessionNotFound(SessionKey),

    /// The message content failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
