//! Document domain module.
//!
//! Metadata and chunking for ingested documents.

mod document;
mod splitter;

pub use document::{Document, DocumentChunk, DocumentId};
pub use splitter::split_text;
