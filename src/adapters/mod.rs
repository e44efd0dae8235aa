//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application core to external systems:
//! - `agent` - Agent executor implementations (RAG pipeline, scripted)
//! - `ai` - OpenAI chat and embedding providers
//! - `diagnostics` - Network probing, tracing, and geolocation
//! - `http` - REST API and SSE endpoints
//! - `observability` - Stream run recording
//! - `session` - Session store implementations
//! - `storage` - Document byte and metadata storage
//! - `vector` - Vector index implementations (Qdrant)

pub mod agent;
pub mod ai;
pub mod diagnostics;
pub mod http;
pub mod observability;
pub mod session;
pub mod storage;
pub mod vector;

pub use agent::{RagAgentExecutor, RagExecutorConfig, ScriptedExecutor};
pub use ai::{OpenAiChatConfig, OpenAiChatModel, OpenAiEmbeddingConfig, OpenAiEmbeddingGenerator};
pub use diagnostics::{HttpRouteTracer, IpApiGeoResolver, TcpLatencyProbe};
pub use observability::EvaluationObserver;
pub use session::InMemorySessionStore;
pub use storage::{InMemoryDocumentRepository, LocalDocumentStorage};
pub use vector::{QdrantIndexConfig, QdrantVectorIndex};
