//! HTTP adapters - REST API implementations.
//!
//! Each feature area has its own HTTP adapter for endpoint exposure.

pub mod agent;
pub mod files;
pub mod health;
pub mod tools;

// Re-export key types for convenience
pub use agent::{agent_router, AgentAppState};
pub use files::{files_router, FilesAppState};
pub use health::health_router;
pub use tools::{tools_router, ToolsAppState};
