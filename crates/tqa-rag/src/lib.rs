//! Retrieval core for the course/forum QA pipeline
//!
//! This crate implements the three stages between cleaned documents and
//! answer synthesis: the word-window chunker, the embedding index builder
//! with flat-file persistence, and the top-k semantic retriever.

mod builder;
mod chunker;
mod index;
mod retriever;
mod store;


pub use builder::{BuiltIndex, IndexBuilder};
pub use chunker::{chunk_corpus, course_chunks, forum_chunks, split_into_chunks, ChunkerConfig};
pub use index::FlatIndex;
pub use retriever::SemanticRetriever;
pub use store::{
    load_chunks, load_course_documents, load_forum_threads, load_metadata, save_chunks,
    save_metadata, StorePaths,
};

// Re-export core types for convenience
pub use tqa_core::{
    Chunk, ChunkRetriever, CourseDocument, Embedder, Error, ForumPost, ForumThread, Origin,
    Result, RetrievedChunk,
};
