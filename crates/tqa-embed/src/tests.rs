//! Snapshot tests for the embeddings client

#[cfg(test)]
mod snapshot_tests {
    use crate::{EmbeddingClient, EmbeddingConfig};
    use tqa_core::Embedder;
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_config_snapshot() {
        let config = EmbeddingConfig {
            api_key: "test_api_key_redacted".to_string(),
            api_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            batch_size: 64,
        };

        assert_yaml_snapshot!(config, @r###"
        ---
        api_key: test_api_key_redacted
        api_url: "https://api.openai.com/v1"
        model: text-embedding-3-small
        batch_size: 64
        "###);
    }

    #[test]
    fn test_model_id() {
        let config = EmbeddingConfig::new("test_key".to_string()).with_model("custom-model");
        let client = EmbeddingClient::new(config).unwrap();
        assert_eq!(client.model_id(), "custom-model");
    }

    #[test]
    fn test_rejects_empty_api_key() {
        let config = EmbeddingConfig::new("  ".to_string());
        assert!(EmbeddingClient::new(config).is_err());
    }
}
