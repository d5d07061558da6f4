//! Engine configuration
//!
//! Every threshold of the engine lives here with its default. Values are
//! overridable through environment variables (a `.env` file is honoured).

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Upstream endpoints for the HTTP-backed sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the Datamuse word service
    #[serde(default = "default_datamuse_url")]
    pub datamuse_url: String,

    /// Entry URL of the Free Dictionary API
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,

    /// Optional word-data endpoint returning definitions and etymology
    #[serde(default)]
    pub word_data_url: Option<String>,

    /// OpenAI API key; the semantic source is disabled when absent
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<String>,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

/// Configuration of the word family engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Per-source fetch budget in milliseconds
    #[serde(default = "default_source_timeout_ms")]
    pub source_timeout_ms: u64,

    /// Per-lookup budget for validation and meta lookups in milliseconds
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Validation lookups in flight at once
    #[serde(default = "default_lookup_concurrency")]
    pub lookup_concurrency: usize,

    /// Semantic neighbors below this cosine similarity are discarded by the source
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,

    /// Non-root nodes scoring below this are removed
    #[serde(default = "default_inclusion_cutoff")]
    pub inclusion_cutoff: f64,

    /// Maximum node count of a graph, root included
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    /// Result cache TTL in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Result cache capacity in entries
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Share one build between concurrent identical requests
    #[serde(default)]
    pub coalesce_in_flight: bool,

    /// Upstream endpoints
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

fn default_source_timeout_ms() -> u64 {
    5_000
}

fn default_lookup_timeout_ms() -> u64 {
    3_000
}

fn default_lookup_concurrency() -> usize {
    8
}

fn default_min_similarity() -> f64 {
    0.35
}

fn default_inclusion_cutoff() -> f64 {
    0.5
}

fn default_max_nodes() -> usize {
    40
}

fn default_cache_ttl_secs() -> u64 {
    3_600 // 1 hour
}

fn default_cache_max_entries() -> usize {
    1_000
}

fn default_datamuse_url() -> String {
    "https://api.datamuse.com".to_string()
}

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            datamuse_url: default_datamuse_url(),
            dictionary_url: default_dictionary_url(),
            word_data_url: None,
            openai_api_key: None,
            embedding_model: default_embedding_model(),
        }
    }
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self {
            source_timeout_ms: default_source_timeout_ms(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            lookup_concurrency: default_lookup_concurrency(),
            min_similarity: default_min_similarity(),
            inclusion_cutoff: default_inclusion_cutoff(),
            max_nodes: default_max_nodes(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            coalesce_in_flight: false,
            endpoints: EndpointConfig::default(),
        }
    }
}

/// Overrides `target` from `key` when set, warning on values that do not parse
fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = env::var(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!("Invalid {} value: {}", key, raw),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl FamilyConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        override_from_env("WORDFAM_SOURCE_TIMEOUT_MS", &mut config.source_timeout_ms);
        override_from_env("WORDFAM_LOOKUP_TIMEOUT_MS", &mut config.lookup_timeout_ms);
        override_from_env("WORDFAM_LOOKUP_CONCURRENCY", &mut config.lookup_concurrency);
        override_from_env("WORDFAM_MIN_SIMILARITY", &mut config.min_similarity);
        override_from_env("WORDFAM_INCLUSION_CUTOFF", &mut config.inclusion_cutoff);
        override_from_env("WORDFAM_MAX_NODES", &mut config.max_nodes);
        override_from_env("WORDFAM_CACHE_TTL_SECS", &mut config.cache_ttl_secs);
        override_from_env("WORDFAM_CACHE_MAX_ENTRIES", &mut config.cache_max_entries);
        override_from_env("WORDFAM_COALESCE_IN_FLIGHT", &mut config.coalesce_in_flight);

        if let Some(url) = non_empty_env("DATAMUSE_API_URL") {
            config.endpoints.datamuse_url = url;
        }
        if let Some(url) = non_empty_env("DICTIONARY_API_URL") {
            config.endpoints.dictionary_url = url;
        }
        config.endpoints.word_data_url = non_empty_env("WORD_DATA_API_URL");
        config.endpoints.openai_api_key = non_empty_env("OPENAI_API_KEY");
        if let Some(model) = non_empty_env("EMBEDDING_MODEL") {
            config.endpoints.embedding_model = model;
        }

        config.sanitize();

        if config.endpoints.openai_api_key.is_none() {
            warn!("No OPENAI_API_KEY provided - semantic neighbors are disabled");
        }

        info!(
            source_timeout_ms = config.source_timeout_ms,
            inclusion_cutoff = config.inclusion_cutoff,
            max_nodes = config.max_nodes,
            coalesce_in_flight = config.coalesce_in_flight,
            "Loaded word family configuration"
        );
        config
    }

    /// Resets out-of-range values to their defaults
    pub fn sanitize(&mut self) {
        if !(0.0..=1.0).contains(&self.inclusion_cutoff) {
            warn!("WORDFAM_INCLUSION_CUTOFF out of range: {}", self.inclusion_cutoff);
            self.inclusion_cutoff = default_inclusion_cutoff();
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            warn!("WORDFAM_MIN_SIMILARITY out of range: {}", self.min_similarity);
            self.min_similarity = default_min_similarity();
        }
        if self.max_nodes == 0 {
            warn!("WORDFAM_MAX_NODES must be at least 1");
            self.max_nodes = default_max_nodes();
        }
        if self.lookup_concurrency == 0 {
            self.lookup_concurrency = default_lookup_concurrency();
        }
        if self.cache_max_entries == 0 {
            warn!("WORDFAM_CACHE_MAX_ENTRIES must be at least 1");
            self.cache_max_entries = default_cache_max_entries();
        }
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FamilyConfig::default();
        assert_eq!(config.source_timeout(), Duration::from_secs(5));
        assert_eq!(config.lookup_timeout(), Duration::from_secs(3));
        assert_eq!(config.min_similarity, 0.35);
        assert_eq!(config.inclusion_cutoff, 0.5);
        assert_eq!(config.max_nodes, 40);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.cache_max_entries, 1000);
        assert!(!config.coalesce_in_flight);
        assert_eq!(config.endpoints.datamuse_url, "https://api.datamuse.com");
        assert!(config.endpoints.word_data_url.is_none());
    }

    #[test]
    fn test_sanitize_resets_out_of_range_values() {
        let mut config = FamilyConfig {
            inclusion_cutoff: 1.5,
            min_similarity: -0.1,
            max_nodes: 0,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.inclusion_cutoff, 0.5);
        assert_eq!(config.min_similarity, 0.35);
        assert_eq!(config.max_nodes, 40);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: FamilyConfig = serde_json::from_str(r#"{"max_nodes": 12}"#).unwrap();
        assert_eq!(config.max_nodes, 12);
        assert_eq!(config.source_timeout_ms, 5000);
        assert_eq!(config.endpoints.embedding_model, "text-embedding-3-small");
    }
}
