//! Agent execution domain module.
//!
//! Defines the execution-event vocabulary produced by agent executors,
//! the client-facing event protocol, and the translator between them.

mod events;
mod final_state;
mod translator;

pub use events::{ClientEvent, ExecutionEvent, NodeStatus, StateSnapshot};
pub use final_state::{AgentFinalState, FALLBACK_ANSWER};
pub use translator::EventTranslator;
