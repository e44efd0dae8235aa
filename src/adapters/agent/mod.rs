//! Agent executor adapters.
//!
//! - `RagAgentExecutor` - Retrieval-augmented pipeline over the chat,
//!   embedding, and vector index ports
//! - `ScriptedExecutor` - Replays a fixed script, for tests and demos

mod rag_executor;
mod scripted_executor;

pub use rag_executor::{RagAgentExecutor, RagExecutorConfig};
pub use scripted_executor::ScriptedExecutor;
