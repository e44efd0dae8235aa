//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers take their dependencies as injected port trait objects and
//! never touch concrete adapters.

pub mod handlers;

pub use handlers::{
    // Query handlers
    QueryCommand, QueryHandler, QueryResult,
    StreamQueryCommand, StreamQueryConfig, StreamQueryHandler,
    // Ingestion handlers
    DeleteDocumentHandler, IngestDocumentCommand, IngestDocumentConfig, IngestDocumentHandler,
};
