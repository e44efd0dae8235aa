//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (validation errors)
//! - `session` - Conversation sessions and their context windows
//! - `agent` - Execution events, client events, and the translator between them
//! - `document` - Ingested document metadata and chunking
//! - `diagnostics` - Service health classification and geolocated hops

pub mod agent;
pub mod diagnostics;
pub mod document;
pub mod foundation;
pub mod session;
