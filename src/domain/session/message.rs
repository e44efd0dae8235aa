//! Message entity for conversation sessions.
//!
//! Messages are immutable records of user/assistant exchanges within a
//! session's context window. Position is implicit insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Which side of the conversation produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operator input.
    User,
    /// Assistant reply.
    Assistant,
}

impl Role {
    /// Stable lowercase name, matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a session's context window. Immutable once built:
/// content must be non-blank and the timestamp is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Builds a message, rejecting empty or whitespace-only content.
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }

        Ok(Self {
            role,
            content,
            created_at: Utc::now(),
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
