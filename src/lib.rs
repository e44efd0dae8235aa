//! NetMind - Network Operations RAG Assistant
//!
//! This crate implements a retrieval-augmented chatbot backend for network
//! operations: runbook ingestion into a vector index, a streaming agent
//! pipeline over SSE, and network diagnostics dashboard endpoints.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
