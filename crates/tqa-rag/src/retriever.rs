//! Query-time top-k retrieval over the persisted index

use async_trait::async_trait;
use std::sync::Arc;

use tqa_core::{Chunk, ChunkRetriever, Embedder, Error, Result, RetrievedChunk};

use crate::index::FlatIndex;
use crate::store::{self, StorePaths};

/// Retriever over the flat index, the metadata sequence, and the chunk
/// store.
///
/// All three artifacts are loaded once at construction and held read-only
/// for the lifetime of the process. Construction fails if their lengths
/// disagree or if the index was built with a different embedding model
/// than the injected one; both conditions would otherwise silently corrupt
/// every retrieval.
pub struct SemanticRetriever {
    index: FlatIndex,
    metadata: Vec<String>,
    chunks: Vec<Chunk>,
    embedder: Arc<dyn Embedder>,
}

impl SemanticRetriever {
    /// Assemble a retriever from already-loaded artifacts
    pub fn new(
        index: FlatIndex,
        metadata: Vec<String>,
        chunks: Vec<Chunk>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        if metadata.len() != chunks.len() {
            return Err(Error::Consistency(format!(
                "metadata has {} entries but chunk store has {}",
                metadata.len(),
                chunks.len()
            )));
        }
        if index.len() != chunks.len() {
            return Err(Error::Consistency(format!(
                "index has {} vectors but chunk store has {} chunks",
                index.len(),
                chunks.len()
            )));
        }
        if index.model_id() != embedder.model_id() {
            return Err(Error::Configuration(format!(
                "index was built with model '{}' but the embedder is '{}'",
                index.model_id(),
                embedder.model_id()
            )));
        }

        Ok(Self {
            index,
            metadata,
            chunks,
            embedder,
        })
    }

    /// Load the persisted index, metadata, and chunk store
    pub fn load(paths: &StorePaths, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let index = FlatIndex::load(&paths.index)?;
        let metadata = store::load_metadata(&paths.metadata)?;
        let chunks = store::load_chunks(&paths.chunks)?;
        Self::new(index, metadata, chunks, embedder)
    }
}

#[async_trait]
impl ChunkRetriever for SemanticRetriever {
    /// Embed the query and return up to `k` chunks, nearest first.
    ///
    /// `k` larger than the corpus truncates to the corpus size; results are
    /// never fabricated. Equal distances rank by lower chunk position.
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        if k == 0 {
            return Err(Error::InvalidInput("k must be positive".to_string()));
        }

        let query_vec = self.embedder.embed_query(query).await?;
        let hits = self.index.search(&query_vec, k)?;

        Ok(hits
            .into_iter()
            .map(|(position, distance)| RetrievedChunk {
                source: self.metadata[position].clone(),
                text: self.chunks[position].text.clone(),
                distance,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }
}
