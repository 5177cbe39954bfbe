//! Embeddings client configuration

use serde::{Deserialize, Serialize};
use std::env;
use tqa_core::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Configuration for the embeddings client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub batch_size: usize,
}

impl EmbeddingConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY")
            .or_else(|_| env::var("EMBEDDING_API_KEY"))
            .map_err(|_| Error::Configuration(
                "OPENAI_API_KEY or EMBEDDING_API_KEY environment variable not found".to_string()
            ))?;

        let api_url = env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            api_url,
            model,
            batch_size: 64,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            batch_size: 64,
        }
    }

    /// Override the embedding model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
