//! Execution events and client-facing events.
//!
//! `ExecutionEvent` is the raw notification stream produced by an agent
//! executor while it processes a query. `ClientEvent` is the normalized,
//! client-facing protocol delivered over SSE: each frame is one JSON
//! object with a `type` discriminator and a `data` payload.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a pipeline node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Started,
    Completed,
}

/// Raw notification produced by an agent executor during a query.
///
/// Completion is signalled by stream exhaustion; failures surface as
/// stream-item errors, not as an event kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    /// A pipeline node started or completed. Names may be dotted paths
    /// (`agent.retrieve`); only the trailing component is client-visible.
    NodeLifecycle { name: String, status: NodeStatus },

    /// An incremental fragment of the streamed answer.
    Token { content: String },

    /// A snapshot of pipeline state, typically accompanying a completed
    /// node. Absent fields default to empty when translated.
    StateSnapshot(StateSnapshot),
}

/// Pipeline state carried by a state-snapshot event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub plan_steps: Option<Vec<String>>,
    pub executed_tools: Option<Vec<String>>,
    pub executed_steps: Option<Vec<String>>,
}

/// A normalized client-facing event.
///
/// Serialized with a `type` discriminator and the payload under `data`;
/// `done` carries no payload at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// A distinct pipeline node transition.
    NodeUpdate { node: String, status: NodeStatus },

    /// A verbatim answer fragment, in arrival order.
    Token { content: String },

    /// A pipeline state snapshot with all three fields always present.
    StateUpdate {
        plan_steps: Vec<String>,
        executed_tools: Vec<String>,
        executed_steps: Vec<String>,
    },

    /// The final aggregate answer. `thought_chain` is serialized as
    /// `null` when the feature flag is off, never omitted.
    FinalResponse {
        content: String,
        executed_tools: Vec<String>,
        executed_steps: Vec<String>,
        thought_chain: Option<Vec<String>>,
    },

    /// Terminal failure for this stream. `traceback` is present only
    /// when the debug flag is on.
    Error {
        message: String,
        #[serde(rename = "type")]
        kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        traceback: Option<String>,
    },

    /// Stream termination marker, always the last frame of a
    /// successful stream.
    Done,
}

impl ClientEvent {
    /// Creates a node transition event.
    pub fn node_update(node: impl Into<String>, status: NodeStatus) -> Self {
        ClientEvent::NodeUpdate {
            node: node.into(),
            status,
        }
    }

    /// Creates a token event.
    pub fn token(content: impl Into<String>) -> Self {
        ClientEvent::Token {
            content: content.into(),
        }
    }

    /// Creates a terminal error event.
    pub fn error(
        message: impl Into<String>,
        kind: impl Into<String>,
        traceback: Option<String>,
    ) -> Self {
        ClientEvent::Error {
            message: message.into(),
            kind: kind.into(),
            traceback,
        }
    }
}
