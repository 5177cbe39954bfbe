//! Embeddings client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use tqa_core::{Embedder, Error, Result};

use crate::config::EmbeddingConfig;

/// Client for OpenAI-compatible `/embeddings` endpoints
pub struct EmbeddingClient {
    config: EmbeddingConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingEntry {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingEntry>,
}

impl EmbeddingClient {
    /// Create a new embeddings client from configuration
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Configuration("embedding API key is empty".to_string()));
        }
        if config.batch_size == 0 {
            return Err(Error::Configuration("embedding batch size must be positive".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new embeddings client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = EmbeddingConfig::from_env()?;
        Self::new(config)
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.config.api_url.trim_end_matches('/'))
    }

    /// Send one batch of texts and return vectors in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::Embedding(format!(
                "embeddings request failed ({}): {}",
                status, body
            )));
        }

        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        // The API does not guarantee response order
        parsed.data.sort_by_key(|entry| entry.index);

        if parsed.data.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "model returned {} embeddings for {} inputs",
                parsed.data.len(),
                texts.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.config.batch_size) {
            let batch_vectors = self.embed_batch(batch).await?;
            vectors.extend(batch_vectors);
        }

        // A dimension change mid-corpus would corrupt the index
        if let Some(first) = vectors.first() {
            let dimension = first.len();
            if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
                return Err(Error::Embedding(format!(
                    "inconsistent embedding dimensions: expected {}, got {}",
                    dimension,
                    bad.len()
                )));
            }
        }

        Ok(vectors)
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}
