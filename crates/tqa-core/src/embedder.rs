//! Embedder trait

use async_trait::async_trait;

use crate::Result;

/// Trait for sentence-embedding models.
///
/// Implementations map each input text to a fixed-dimension `f32` vector.
/// The same model must be used at index-build time and at query time; the
/// `model_id` is persisted alongside the index so a mismatch can be caught
/// at load time instead of silently returning wrong neighbors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query text
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let input = [text.to_string()];
        let mut vectors = self.embed(&input).await?;
        vectors
            .pop()
            .ok_or_else(|| crate::Error::Embedding("model returned no vector for query".to_string()))
    }

    /// Stable identifier of the underlying model
    fn model_id(&self) -> &str;
}
