//! HTTP handlers for agent query endpoints.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderName, StatusCode},
    response::{sse::Event, IntoResponse, Response, Sse},
    Json,
};
use futures::StreamExt;
use tracing::error;

use crate::application::handlers::{
    ClientEventStream, IncomingMessage, QueryCommand, QueryError, QueryHandler,
    StreamQueryCommand, StreamQueryError, StreamQueryHandler,
};
use crate::domain::session::{SessionKey, UserKey};
use crate::ports::SessionStore;

use super::dto::{
    AgentQueryRequest, ClearSessionResponse, ErrorResponse, QueryResponse, SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application state for agent endpoints.
#[derive(Clone)]
pub struct AgentAppState {
    /// Streaming query pipeline (injected)
    pub stream_handler: Arc<StreamQueryHandler>,
    /// One-shot query pipeline (injected)
    pub query_handler: Arc<QueryHandler>,
    /// Session store, for inspection and clearing
    pub sessions: Arc<dyn SessionStore>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/agent/query/stream - Run a query, streaming events over SSE
pub async fn stream_query(
    State(state): State<AgentAppState>,
    Json(request): Json<AgentQueryRequest>,
) -> Response {
    let command = match to_command(request) {
        Ok((session_key, user_key, messages)) => StreamQueryCommand {
            session_key,
            user_key,
            messages,
        },
        Err(response) => return response,
    };

    match state.stream_handler.handle(command).await {
        Ok(events) => sse_response(events),
        Err(e) => handle_stream_error(e),
    }
}

/// POST /api/agent/query - Run a query to completion
pub async fn query(
    State(state): State<AgentAppState>,
    Json(request): Json<AgentQueryRequest>,
) -> Response {
    let command = match to_command(request) {
        Ok((session_key, user_key, messages)) => QueryCommand {
            session_key,
            user_key,
            messages,
        },
        Err(response) => return response,
    };

    match state.query_handler.handle(command).await {
        Ok(result) => (StatusCode::OK, Json(QueryResponse::from_result(result))).into_response(),
        Err(e) => handle_query_error(e),
    }
}

/// GET /api/agent/session/:session_id - Inspect a session's context window
pub async fn get_session(
    State(state): State<AgentAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match SessionKey::new(session_id) {
        Ok(key) => key,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match state.sessions.get(&session_key).await {
        Some(snapshot) => (
            StatusCode::OK,
            Json(SessionResponse::from_snapshot(&snapshot)),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!(
                "session '{}' not found",
                session_key
            ))),
        )
            .into_response(),
    }
}

/// DELETE /api/agent/session/:session_id - Clear a session
pub async fn clear_session(
    State(state): State<AgentAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match SessionKey::new(session_id) {
        Ok(key) => key,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    if state.sessions.clear(&session_key).await {
        (
            StatusCode::OK,
            Json(ClearSessionResponse {
                session_id: session_key.to_string(),
                status: "cleared".to_string(),
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!(
                "session '{}' not found",
                session_key
            ))),
        )
            .into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request mapping and error handling
// ════════════════════════════════════════════════════════════════════════════

type CommandParts = (SessionKey, Option<UserKey>, Vec<IncomingMessage>);

fn to_command(request: AgentQueryRequest) -> Result<CommandParts, Response> {
    let session_key = SessionKey::new(request.session_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response()
    })?;

    // A blank user_id means no attribution, not a validation failure.
    let user_key = request
        .user_id
        .as_deref()
        .and_then(|id| UserKey::new(id).ok());

    let messages = request
        .messages
        .into_iter()
        .map(|m| IncomingMessage {
            role: m.role,
            content: m.content,
        })
        .collect();

    Ok((session_key, user_key, messages))
}

/// Builds the SSE response with the proxy-buster headers the stream needs.
fn sse_response(events: ClientEventStream) -> Response {
    let frames = events.filter_map(|event| async move {
        match Event::default().json_data(&event) {
            Ok(frame) => Some(Ok::<Event, Infallible>(frame)),
            Err(e) => {
                error!(error = %e, "dropping unserializable client event");
                None
            }
        }
    });

    (
        [
            (HeaderName::from_static("cache-control"), "no-cache"),
            (HeaderName::from_static("connection"), "keep-alive"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        Sse::new(frames),
    )
        .into_response()
}

fn handle_stream_error(error: StreamQueryError) -> Response {
    match error {
        StreamQueryError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        StreamQueryError::Session(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

fn handle_query_error(error: QueryError) -> Response {
    match error {
        QueryError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        QueryError::Session(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
        QueryError::Executor(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
            .into_response(),
    }
}
