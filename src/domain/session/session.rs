//! Session aggregate owning the conversational context window.
//!
//! A session is created on first reference to an unseen session key and
//! mutated only by message appends. Appends carry an idempotent
//! re-submission guard so client retries do not duplicate entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::message::{Message, Role};

/// Caller-supplied identifier used to look up or create a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Creates a session key from any non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional caller-supplied user identifier attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Creates a user key from any non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conversation session with its ordered context window.
#[derive(Debug, Clone)]
pub struct Session {
    key: SessionKey,
    user_key: Option<UserKey>,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session for the given key.
    pub fn new(key: SessionKey) -> Self {
        let now = Utc::now();
        Self {
            key,
            user_key: None,
            messages: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    /// Returns the session key.
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Returns the attached user key, if any.
    pub fn user_key(&self) -> Option<&UserKey> {
        self.user_key.as_ref()
    }

    /// Returns the ordered context window.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages in the context window.
    pub fn context_length(&self) -> usize {
        self.messages.len()
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session last accepted an append.
    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    /// Attaches a user key if none is attached yet.
    ///
    /// Returns `true` if the key was set by this call. An already
    /// attached key is never overwritten.
    pub fn set_user_key_if_unset(&mut self, user_key: UserKey) -> bool {
        if self.user_key.is_none() {
            self.user_key = Some(user_key);
            true
        } else {
            false
        }
    }

    /// Appends a message unless it duplicates the most recent message
    /// with the same role.
    ///
    /// The guard scans backward through the context window for the last
    /// message carrying `role`; if its content string-equals `content`,
    /// the append is skipped. Returns `true` when a message was appended.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if content is empty or whitespace.
    pub fn append_if_new(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<bool, ValidationError> {
        let message = Message::new(role, content)?;

        let last_same_role = self.messages.iter().rev().find(|m| m.role() == role);
        if let Some(previous) = last_same_role {
            if previous.content() == message.content() {
                return Ok(false);
            }
        }

        self.messages.push(message);
        self.last_active_at = Utc::now();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionKey::new("sess-1").unwrap())
    }

    #[test]
    fn new_session_is_empty() {
        let s = session();
        assert_eq!(s.context_length(), 0);
        assert!(s.user_key().is_none());
    }

    #[test]
    fn session_key_rejects_empty() {
        assert!(SessionKey::new("").is_err());
        assert!(SessionKey::new("   ").is_err());
    }

    #[test]
    fn append_adds_message() {
        let mut s = session();
        let appended = s.append_if_new(Role::User, "ping the gateway").unwrap();
        assert!(appended);
        assert_eq!(s.context_length(), 1);
        assert_eq!(s.messages()[0].content(), "ping the gateway");
    }

    #[test]
    fn duplicate_user_append_is_skipped() {
        let mut s = session();
        assert!(s.append_if_new(Role::User, "same question").unwrap());
        assert!(!s.append_if_new(Role::User, "same question").unwrap());
        assert_eq!(s.context_length(), 1);
    }

    #[test]
    fn duplicate_guard_compares_against_last_same_role_message() {
        // The backward scan finds the most recent user message even when
        // an assistant reply sits in between.
        let mut s = session();
        assert!(s.append_if_new(Role::User, "status?").unwrap());
        assert!(s.append_if_new(Role::Assistant, "all good").unwrap());
        assert!(!s.append_if_new(Role::User, "status?").unwrap());
        assert_eq!(s.context_length(), 2);
    }

    #[test]
    fn different_content_is_appended() {
        let mut s = session();
        assert!(s.append_if_new(Role::User, "first").unwrap());
        assert!(s.append_if_new(Role::User, "second").unwrap());
        assert_eq!(s.context_length(), 2);
    }

    #[test]
    fn same_content_different_role_is_appended() {
        let mut s = session();
        assert!(s.append_if_new(Role::User, "echo").unwrap());
        assert!(s.append_if_new(Role::Assistant, "echo").unwrap());
        assert_eq!(s.context_length(), 2);
    }

    #[test]
    fn append_rejects_empty_content() {
        let mut s = session();
        assert!(s.append_if_new(Role::User, "  ").is_err());
        assert_eq!(s.context_length(), 0);
    }

    #[test]
    fn user_key_set_only_once() {
        let mut s = session();
        assert!(s.set_user_key_if_unset(UserKey::new("alice").unwrap()));
        assert!(!s.set_user_key_if_unset(UserKey::new("bob").unwrap()));
        assert_eq!(s.user_key().map(UserKey::as_str), Some("alice"));
    }

    #[test]
    fn appends_preserve_order() {
        let mut s = session();
        s.append_if_new(Role::User, "one").unwrap();
        s.append_if_new(Role::Assistant, "two").unwrap();
        s.append_if_new(Role::User, "three").unwrap();
        let contents: Vec<_> = s.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }
}
