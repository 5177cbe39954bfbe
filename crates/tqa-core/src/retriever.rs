//! Retriever trait and result types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A chunk returned from a retrieval query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub source: String,
    pub text: String,
    /// Squared L2 distance between the query vector and this chunk's vector
    pub distance: f32,
}

/// Trait for top-k semantic retrieval over the chunk corpus.
///
/// This is the sole boundary exposed to the answer-synthesis layer. Results
/// are ordered nearest-first; no minimum-similarity threshold is applied, so
/// a query may return chunks that are not semantically relevant.
#[async_trait]
pub trait ChunkRetriever: Send + Sync {
    /// Return up to `k` chunks ranked by ascending distance to the query
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>>;

    /// Number of chunks in the corpus
    fn len(&self) -> usize;

    /// Whether the corpus is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
