//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Conversation Ports
//!
//! - `SessionStore` - Per-key session state with guarded appends
//! - `AgentExecutor` - Black-box agent pipeline (event stream + final state)
//! - `StreamObserver` - Optional instrumentation hooks on streaming runs
//!
//! ## Provider Ports
//!
//! - `ChatModel` - LLM chat completions (one-shot and streaming)
//! - `EmbeddingGenerator` - Text embedding batches
//! - `VectorIndex` - External vector database access
//!
//! ## Ingestion Ports
//!
//! - `DocumentRepository` - Document metadata records
//! - `DocumentStorage` - Raw uploaded file bytes
//!
//! ## Diagnostics Ports
//!
//! - `LatencyProbe` - Connect-latency measurement
//! - `RouteTracer` - Public route resolution
//! - `GeoResolver` - Batch IP geolocation

mod agent_executor;
mod chat_model;
mod diagnostics;
mod document_repository;
mod document_storage;
mod embedding_generator;
mod session_store;
mod stream_observer;
mod vector_index;

pub use agent_executor::{AgentExecutor, ExecutionEventStream, ExecutorError};
pub use chat_model::{
    ChatCompletion, ChatDelta, ChatDeltaStream, ChatMessage, ChatModel, ChatModelError, ChatRequest,
    ChatRole,
};
pub use diagnostics::{DiagnosticsError, GeoResolver, LatencyProbe, RouteTracer};
pub use document_repository::{DocumentRepository, RepositoryError};
pub use document_storage::{DocumentStorage, StorageError};
pub use embedding_generator::{EmbeddingError, EmbeddingGenerator};
pub use session_store::{SessionSnapshot, SessionStore, SessionStoreError};
pub use stream_observer::StreamObserver;
pub use vector_index::{ScoredChunk, VectorIndex, VectorIndexError};
