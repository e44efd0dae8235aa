//! AI Provider Adapters.
//!
//! Implementations of the ChatModel and EmbeddingGenerator ports against
//! the OpenAI API.
//!
//! ## Available Adapters
//!
//! - `OpenAiChatModel` - Chat completions with retry and SSE streaming
//! - `OpenAiEmbeddingGenerator` - Batch text embeddings

mod openai_chat_model;
mod openai_embeddings;

pub use openai_chat_model::{OpenAiChatConfig, OpenAiChatModel};
pub use openai_embeddings::{OpenAiEmbeddingConfig, OpenAiEmbeddingGenerator};
