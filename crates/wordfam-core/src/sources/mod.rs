//! Concrete data sources
//!
//! HTTP-backed adapters (Datamuse, Free Dictionary, word-data endpoint) and
//! local ones (morphology rules, curated compounds, embedding similarity,
//! static word list). Each adapter only queries its upstream and normalizes
//! the payload; merging and validation happen in the services.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::info;

use wordfam_interfaces::{SourceError, SourceResult};

use crate::config::FamilyConfig;
use crate::embedding::{create_embedding_generator, EmbeddingConfig};
use crate::services::FamilySources;

pub mod compound;
pub mod datamuse;
pub mod dictionary;
pub mod embedding;
pub mod lexicon;
pub mod morphology;
pub mod word_data;

pub use compound::CompoundSource;
pub use datamuse::{DatamuseAssociationSource, DatamuseClient, DatamuseDerivationSource, DatamuseLexicon};
pub use dictionary::FreeDictionarySource;
pub use embedding::{EmbeddingSimilaritySource, DEFAULT_VOCABULARY};
pub use lexicon::StaticLexicon;
pub use morphology::MorphologySource;
pub use word_data::WordDataSource;

/// Wires up every source the configuration enables.
///
/// Datamuse and the Free Dictionary are always registered; the word-data meta
/// source and the embedding source only when their endpoint or key is set.
pub fn configured_sources(config: &FamilyConfig) -> SourceResult<FamilySources> {
    let endpoints = &config.endpoints;
    let datamuse = DatamuseClient::new(&endpoints.datamuse_url, config.source_timeout())?;
    let dictionary = Arc::new(FreeDictionarySource::new(&endpoints.dictionary_url, config.lookup_timeout())?);

    let mut sources = FamilySources::new()
        .with_candidate_source(Arc::new(DatamuseDerivationSource::new(datamuse.clone())))
        .with_candidate_source(Arc::new(DatamuseAssociationSource::new(datamuse.clone())))
        .with_candidate_source(Arc::new(MorphologySource::new()))
        .with_candidate_source(Arc::new(CompoundSource::new()));

    if let Some(generator) = create_embedding_generator(&EmbeddingConfig::from_endpoints(endpoints)) {
        sources = sources.with_candidate_source(Arc::new(EmbeddingSimilaritySource::new(
            generator,
            config.min_similarity,
        )));
    }

    sources = sources
        .with_meta_source(dictionary.clone())
        .with_lexicon(Arc::new(DatamuseLexicon::new(datamuse)))
        .with_lexicon(dictionary);

    if let Some(url) = &endpoints.word_data_url {
        sources = sources.with_meta_source(Arc::new(WordDataSource::new(url, config.lookup_timeout())?));
    }

    info!(sources = ?sources.candidate_names(), "Configured word family sources");
    Ok(sources)
}

/// Builds the HTTP client shared by all calls to one upstream
pub(crate) fn build_http_client(timeout: Duration) -> SourceResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("wordfam/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SourceError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Maps a reqwest error to a SourceError
pub(crate) fn map_http_error(error: reqwest::Error, timeout: Duration) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout(timeout.as_millis() as u64)
    } else if error.is_connect() || error.is_request() {
        SourceError::Transport(format!("Connection error: {}", error))
    } else if error.is_decode() {
        SourceError::Decode(error.to_string())
    } else {
        SourceError::Transport(format!("HTTP error: {}", error))
    }
}

/// Decodes a successful JSON response, or maps the status to an error
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> SourceResult<T> {
    match response.status() {
        StatusCode::OK => response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Decode(format!("Failed to parse response: {}", e))),
        status => Err(SourceError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        }),
    }
}
