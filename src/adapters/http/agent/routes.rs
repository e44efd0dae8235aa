//! Axum router configuration for agent endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{clear_session, get_session, query, stream_query, AgentAppState};

/// Create the agent API router.
///
/// # Routes
///
/// ## Queries
/// - `POST /query/stream` - Run a query, streaming events over SSE
/// - `POST /query` - Run a query to completion
///
/// ## Sessions
/// - `GET /session/:session_id` - Inspect a session's context window
/// - `DELETE /session/:session_id` - Clear a session
pub fn agent_routes() -> Router<AgentAppState> {
    Router::new()
        // Queries
        .route("/query/stream", post(stream_query))
        .route("/query", post(query))
        // Sessions
        .route("/session/:session_id", get(get_session).delete(clear_session))
}

/// Create the complete agent module router.
///
/// Suitable for mounting at `/api/agent`.
pub fn agent_router() -> Router<AgentAppState> {
    agent_routes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = agent_routes();
    }
}
