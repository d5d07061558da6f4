#[cfg(feature = "async-openai")]
use async_openai::{
    config::OpenAIConfig,
    types::{CreateEmbeddingRequestArgs, EmbeddingInput},
    Client,
};
#[cfg(feature = "async-openai")]
use async_trait::async_trait;
#[cfg(feature = "async-openai")]
use tracing::{debug, instrument};

#[cfg(feature = "async-openai")]
use wordfam_interfaces::{SourceError, SourceResult};

#[cfg(feature = "async-openai")]
use super::EmbeddingGenerator;

#[cfg(feature = "async-openai")]
fn embedding_error(message: impl std::fmt::Display) -> SourceError {
    SourceError::Internal(format!("Embedding generation failed: {}", message))
}

#[cfg(feature = "async-openai")]
pub struct OpenAIEmbeddingGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

#[cfg(feature = "async-openai")]
impl OpenAIEmbeddingGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);
        Self { client, model }
    }
}

#[cfg(feature = "async-openai")]
#[async_trait]
impl EmbeddingGenerator for OpenAIEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> SourceResult<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(EmbeddingInput::String(text.to_string()))
            .build()
            .map_err(embedding_error)?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(embedding_error)?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| SourceError::Decode("empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(model = %self.model, count = texts.len()))]
    async fn generate_embeddings(&self, texts: &[String]) -> SourceResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(texts.to_vec())
            .build()
            .map_err(embedding_error)?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(embedding_error)?;

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        debug!(returned = data.len(), "Received embedding batch");
        if data.len() != texts.len() {
            return Err(SourceError::Decode(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                data.len()
            )));
        }
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}
