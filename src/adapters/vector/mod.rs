//! Vector Index Adapters.
//!
//! - `QdrantVectorIndex` - Qdrant REST API adapter

mod qdrant_index;

pub use qdrant_index::{QdrantIndexConfig, QdrantVectorIndex};
