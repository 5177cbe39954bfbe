//! Core traits and types for the course/forum QA retrieval pipeline
//!
//! This crate defines the fundamental traits and types shared across the
//! pipeline: chunk and cleaned-document records, the embedder seam, the
//! retriever boundary exposed to answer synthesis, and the common error
//! type. Keeping the seams trait-based makes the system test-friendly:
//! tests substitute a deterministic fake embedder for the HTTP client.

pub mod chunk;
pub mod embedder;
pub mod error;
pub mod retriever;

pub use chunk::{Chunk, CourseDocument, ForumPost, ForumThread, Origin};
pub use embedder::Embedder;
pub use error::{Error, Result};
pub use retriever::{ChunkRetriever, RetrievedChunk};
