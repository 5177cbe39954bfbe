//! One-shot embedding index construction

use std::sync::Arc;

use tqa_core::{Chunk, Embedder, Error, Result};

use crate::index::FlatIndex;
use crate::store::{self, StorePaths};

/// The index and its positionally aligned source-tag sequence
pub struct BuiltIndex {
    pub index: FlatIndex,
    pub metadata: Vec<String>,
}

/// Builds the flat index from the full chunk sequence.
///
/// Construction is a one-shot batch: it runs to completion or fails without
/// writing anything. There is no incremental merge with a previous index; a
/// rebuild replaces the persisted artifacts wholesale.
pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
}

impl IndexBuilder {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Embed every chunk text and build the in-memory index.
    ///
    /// The returned metadata sequence has exactly one source tag per chunk,
    /// in chunk order, so position joins the three artifacts.
    pub async fn build(&self, chunks: &[Chunk]) -> Result<BuiltIndex> {
        if chunks.is_empty() {
            return Err(Error::Index(
                "cannot build an index from an empty chunk sequence".to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let metadata: Vec<String> = chunks.iter().map(|c| c.source.clone()).collect();

        let vectors = self.embedder.embed(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(Error::Embedding(format!(
                "model returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let index = FlatIndex::from_vectors(self.embedder.model_id(), &vectors)?;
        Ok(BuiltIndex { index, metadata })
    }

    /// Build from the persisted chunk store and write the index and
    /// metadata artifacts, overwriting any previous build
    pub async fn build_and_persist(&self, paths: &StorePaths) -> Result<BuiltIndex> {
        let chunks = store::load_chunks(&paths.chunks)?;
        let built = self.build(&chunks).await?;

        built.index.save(&paths.index)?;
        store::save_metadata(&paths.metadata, &built.metadata)?;
        Ok(built)
    }
}
