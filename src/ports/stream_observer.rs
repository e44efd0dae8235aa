//! Stream Observer Port - Optional instrumentation for streaming runs.
//!
//! An observer attaches to the streaming pipeline's event loop and is
//! awaited inline at two hook points: before a `node_update` frame is
//! emitted, and after the `final_response` frame is emitted. Observers
//! capture evaluation data; they cannot alter or veto the stream.

use async_trait::async_trait;

use crate::domain::agent::{AgentFinalState, NodeStatus};
use crate::domain::session::SessionKey;

/// Port for cross-cutting observation of streaming runs.
#[async_trait]
pub trait StreamObserver: Send + Sync {
    /// Called before a node transition is emitted to the client.
    async fn on_node_update(&self, session_key: &SessionKey, node: &str, status: NodeStatus);

    /// Called after the final response is emitted to the client.
    async fn on_final_response(&self, session_key: &SessionKey, state: &AgentFinalState);
}
