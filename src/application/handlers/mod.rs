//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod delete_document;
pub mod ingest_document;
pub mod query;
pub mod stream_query;

pub use delete_document::{DeleteDocumentError, DeleteDocumentHandler};
pub use ingest_document::{
    IngestDocumentCommand, IngestDocumentConfig, IngestDocumentHandler, IngestError,
};
pub use query::{QueryCommand, QueryError, QueryHandler, QueryResult};
pub use stream_query::{
    ClientEventStream, IncomingMessage, StreamQueryCommand, StreamQueryConfig, StreamQueryError,
    StreamQueryHandler,
};
