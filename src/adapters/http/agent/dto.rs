//! HTTP DTOs for agent query endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::QueryResult;
use crate::domain::session::{Message, Role};
use crate::ports::SessionSnapshot;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request body for both query endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentQueryRequest {
    /// Client-chosen session identifier.
    pub session_id: String,
    /// Optional user attribution.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Full conversation, oldest first.
    pub messages: Vec<MessageDto>,
}

/// One conversation message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub role: Role,
    pub content: String,
}

impl MessageDto {
    pub fn from_message(message: &Message) -> Self {
        Self {
            role: message.role(),
            content: message.content().to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for the non-streaming query endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub session_id: String,
    pub response: String,
    pub executed_tools: Vec<String>,
    pub executed_steps: Vec<String>,
}

impl QueryResponse {
    pub fn from_result(result: QueryResult) -> Self {
        Self {
            session_id: result.session_key.to_string(),
            response: result.answer,
            executed_tools: result.executed_tools,
            executed_steps: result.executed_steps,
        }
    }
}

/// Session inspection response.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub user_id: Option<String>,
    pub messages: Vec<MessageDto>,
    pub context_length: usize,
    pub created_at: String,
    pub last_active_at: String,
}

impl SessionResponse {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            session_id: snapshot.session_key.to_string(),
            user_id: snapshot.user_key.as_ref().map(|k| k.to_string()),
            messages: snapshot.messages.iter().map(MessageDto::from_message).collect(),
            context_length: snapshot.context_length(),
            created_at: snapshot.created_at.to_rfc3339(),
            last_active_at: snapshot.last_active_at.to_rfc3339(),
        }
    }
}

/// Response for session clearing.
#[derive(Debug, Clone, Serialize)]
pub struct ClearSessionResponse {
    pub session_id: String,
    pub status: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal_error".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::SessionKey;
    use chrono::Utc;

    #[test]
    fn query_request_deserializes_without_user_id() {
        let json = r#"{
            "session_id": "sess-1",
            "messages": [{"role": "user", "content": "link down?"}]
        }"#;
        let request: AgentQueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.session_id, "sess-1");
        assert!(request.user_id.is_none());
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
    }

    #[test]
    fn session_response_reflects_snapshot() {
        let snapshot = SessionSnapshot {
            session_key: SessionKey::new("sess-1").unwrap(),
            user_key: None,
            messages: vec![
                Message::new(Role::User, "hi").unwrap(),
                Message::new(Role::Assistant, "hello").unwrap(),
            ],
            created_at: Utc::now(),
            last_active_at: Utc::now(),
        };

        let response = SessionResponse::from_snapshot(&snapshot);
        assert_eq!(response.session_id, "sess-1");
        assert_eq!(response.user_id, None);
        assert_eq!(response.context_length, 2);
        assert_eq!(response.messages[1].content, "hello");
    }

    #[test]
    fn error_response_serializes_shape() {
        let value = serde_json::to_value(ErrorResponse::bad_request("no messages")).unwrap();
        assert_eq!(value["error"], "bad_request");
        assert_eq!(value["message"], "no messages");
    }
}
