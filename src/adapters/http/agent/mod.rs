//! HTTP adapter for agent query endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AgentQueryRequest, ClearSessionResponse, ErrorResponse, MessageDto, QueryResponse,
    SessionResponse,
};
pub use handlers::AgentAppState;
pub use routes::{agent_router, agent_routes};
