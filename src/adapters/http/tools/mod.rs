//! Tools HTTP adapter - REST API for network diagnostics.
//!
//! Provides endpoints for:
//! - Dashboard status over monitored services
//! - Geolocated route tracing

pub mod dto;
pub mod handlers;
pub mod routes;

// Export DTOs for external use
pub use dto::*;

// Export handlers state and router
pub use handlers::ToolsAppState;
pub use routes::{tools_router, tools_routes};
