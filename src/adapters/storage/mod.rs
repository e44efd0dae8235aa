//! Storage Adapters
//!
//! Implementations of the DocumentStorage and DocumentRepository ports.
//!
//! ## Available Adapters
//!
//! - **LocalDocumentStorage** - Uploaded bytes on the local filesystem
//! - **InMemoryDocumentRepository** - Document metadata in memory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryDocumentRepository, LocalDocumentStorage};
//!
//! let storage = LocalDocumentStorage::new("./data/uploads");
//! let repository = InMemoryDocumentRepository::new();
//! ```

mod in_memory_document_repository;
mod local_document_storage;

pub use in_memory_document_repository::InMemoryDocumentRepository;
pub use local_document_storage::LocalDocumentStorage;
