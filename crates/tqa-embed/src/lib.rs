//! Embeddings client for the QA retrieval pipeline
//!
//! This crate provides an `Embedder` implementation backed by an
//! OpenAI-compatible `/embeddings` HTTP endpoint.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::EmbeddingClient;
pub use config::{EmbeddingConfig, DEFAULT_API_URL, DEFAULT_MODEL};

// Re-export core types for convenience
pub use tqa_core::{Embedder, Error, Result};
