use async_trait::async_trait;
use std::sync::Arc;
use wordfam_interfaces::SourceResult;

mod openai;

#[cfg(feature = "async-openai")]
pub use openai::OpenAIEmbeddingGenerator;

/// Represents the interface for generating vector embeddings from text.
#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    /// Generates an embedding vector for the given text.
    async fn generate_embedding(&self, text: &str) -> SourceResult<Vec<f32>>;

    /// Generates embeddings for several texts, in input order.
    ///
    /// The default issues one call per text; backends with a batch endpoint
    /// should override it.
    async fn generate_embeddings(&self, texts: &[String]) -> SourceResult<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.generate_embedding(text).await?);
        }
        Ok(embeddings)
    }
}

/// Cosine similarity of two vectors; 0.0 when either is empty, zero or the
/// lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Configuration for embedding backends
#[derive(Debug, Clone)]
pub enum EmbeddingConfig {
    /// Use the OpenAI embeddings API
    OpenAI { api_key: String, model: String },
    /// No backend; the semantic source is not registered
    Disabled,
}

impl EmbeddingConfig {
    /// Picks the OpenAI backend when a key is configured
    pub fn from_endpoints(endpoints: &crate::config::EndpointConfig) -> Self {
        match &endpoints.openai_api_key {
            Some(api_key) => Self::OpenAI {
                api_key: api_key.clone(),
                model: endpoints.embedding_model.clone(),
            },
            None => Self::Disabled,
        }
    }
}

/// Creates an embedding generator for the configuration, or `None` when
/// semantic similarity is unavailable.
pub fn create_embedding_generator(config: &EmbeddingConfig) -> Option<Arc<dyn EmbeddingGenerator>> {
    match config {
        #[cfg(feature = "async-openai")]
        EmbeddingConfig::OpenAI { api_key, model } => Some(Arc::new(
            OpenAIEmbeddingGenerator::new(api_key.clone(), model.clone()),
        )),
        #[cfg(not(feature = "async-openai"))]
        EmbeddingConfig::OpenAI { .. } => {
            tracing::warn!("OpenAI embeddings requested but the 'embed-openai' feature is not enabled");
            None
        }
        EmbeddingConfig::Disabled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 1.0], &[1.0, 0.0]) - 0.7071).abs() < 1e-3);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_disabled_config_creates_nothing() {
        assert!(create_embedding_generator(&EmbeddingConfig::Disabled).is_none());
        let config = EmbeddingConfig::from_endpoints(&crate::config::EndpointConfig::default());
        assert!(matches!(config, EmbeddingConfig::Disabled));
    }
}
