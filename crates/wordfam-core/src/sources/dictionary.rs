//! Free Dictionary API adapter (`api.dictionaryapi.dev`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use wordfam_interfaces::{Lexicon, MetaSource, SourceError, SourceResult, WordMeta};

use super::{build_http_client, decode_json, map_http_error};

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meaning {
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    definition: String,
    #[serde(default)]
    example: Option<String>,
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

impl DictionaryEntry {
    /// `"(pos) definition"` from the first meaning that has one
    fn short_definition(&self) -> Option<String> {
        self.meanings.iter().find_map(|meaning| {
            let definition = meaning.definitions.first()?.definition.trim();
            if definition.is_empty() {
                return None;
            }
            Some(match non_blank(meaning.part_of_speech.as_deref()) {
                Some(pos) => format!("({}) {}", pos, definition),
                None => definition.to_string(),
            })
        })
    }

    fn first_example(&self) -> Option<String> {
        self.meanings
            .iter()
            .flat_map(|m| m.definitions.iter())
            .find_map(|d| non_blank(d.example.as_deref()))
    }
}

/// Definitions, usage examples and origins from the Free Dictionary API.
///
/// Also serves as a lexicon: a word with an entry is attested.
#[derive(Debug, Clone)]
pub struct FreeDictionarySource {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl FreeDictionarySource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_http_client(timeout)?,
            timeout,
        })
    }

    /// Fetches the entries for `word`; `None` when the dictionary has no entry
    async fn entries(&self, word: &str) -> SourceResult<Option<Vec<DictionaryEntry>>> {
        let url = format!("{}/{}", self.base_url, word);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_http_error(e, self.timeout))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let entries: Vec<DictionaryEntry> = decode_json(response).await?;
        Ok(Some(entries))
    }
}

#[async_trait]
impl MetaSource for FreeDictionarySource {
    fn name(&self) -> &str {
        "free-dictionary"
    }

    #[instrument(skip(self), fields(source = "free-dictionary"))]
    async fn lookup(&self, word: &str) -> SourceResult<WordMeta> {
        let Some(entries) = self.entries(word).await? else {
            debug!("No dictionary entry");
            return Ok(WordMeta::default());
        };

        let mut meta = WordMeta::default();
        for entry in &entries {
            meta.fill_missing(WordMeta {
                definition: entry.short_definition(),
                etymology: non_blank(entry.origin.as_deref()),
                usage: entry.first_example(),
            });
        }
        Ok(meta)
    }
}

#[async_trait]
impl Lexicon for FreeDictionarySource {
    fn name(&self) -> &str {
        "free-dictionary"
    }

    async fn contains(&self, word: &str) -> SourceResult<bool> {
        match self.entries(word).await {
            Ok(Some(entries)) => Ok(!entries.is_empty()),
            Ok(None) => Ok(false),
            Err(SourceError::Decode(message)) => {
                debug!(word = %word, %message, "Undecodable dictionary entry counted as present");
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_test_source() -> (MockServer, FreeDictionarySource) {
        let mock_server = MockServer::start().await;
        let source = FreeDictionarySource::new(mock_server.uri(), Duration::from_secs(2)).unwrap();
        (mock_server, source)
    }

    #[tokio::test]
    async fn test_lookup_formats_definition() {
        let (mock_server, source) = setup_test_source().await;

        Mock::given(method("GET"))
            .and(path("/run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "word": "run",
                "origin": "Old English rinnan",
                "meanings": [{
                    "partOfSpeech": "verb",
                    "definitions": [
                        {"definition": "Move at a speed faster than a walk."},
                        {"definition": "Manage a business.", "example": "she runs a small hotel"}
                    ]
                }]
            }])))
            .mount(&mock_server)
            .await;

        let meta = source.lookup("run").await.unwrap();
        assert_eq!(meta.definition.as_deref(), Some("(verb) Move at a speed faster than a walk."));
        assert_eq!(meta.etymology.as_deref(), Some("Old English rinnan"));
        assert_eq!(meta.usage.as_deref(), Some("she runs a small hotel"));
    }

    #[tokio::test]
    async fn test_lookup_missing_word_is_empty() {
        let (mock_server, source) = setup_test_source().await;

        Mock::given(method("GET"))
            .and(path("/runness"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"title": "No Definitions Found"})))
            .mount(&mock_server)
            .await;

        assert!(source.lookup("runness").await.unwrap().is_empty());
        assert!(!source.contains("runness").await.unwrap());
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let (mock_server, source) = setup_test_source().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let error = source.contains("run").await.unwrap_err();
        assert!(matches!(error, SourceError::Status { status: 500, .. }));
    }
}
