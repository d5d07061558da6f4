//! Optional word-data endpoint adapter.
//!
//! The endpoint is called as `GET {url}?word={word}` and answers
//! `{"definitions": [...], "etymology": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use wordfam_interfaces::{MetaSource, SourceResult, WordMeta};

use super::{build_http_client, decode_json, map_http_error};

#[derive(Debug, Default, Deserialize)]
struct WordData {
    #[serde(default)]
    definitions: Vec<String>,
    #[serde(default)]
    etymology: Option<String>,
}

pub struct WordDataSource {
    url: String,
    client: Client,
    timeout: Duration,
}

impl WordDataSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        Ok(Self {
            url: url.into(),
            client: build_http_client(timeout)?,
            timeout,
        })
    }
}

#[async_trait]
impl MetaSource for WordDataSource {
    fn name(&self) -> &str {
        "word-data"
    }

    #[instrument(skip(self), fields(source = "word-data"))]
    async fn lookup(&self, word: &str) -> SourceResult<WordMeta> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("word", word)])
            .send()
            .await
            .map_err(|e| map_http_error(e, self.timeout))?;
        let data: WordData = decode_json(response).await?;

        Ok(WordMeta {
            definition: data
                .definitions
                .into_iter()
                .map(|d| d.trim().to_string())
                .find(|d| !d.is_empty()),
            etymology: data.etymology.filter(|e| !e.trim().is_empty()),
            usage: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wordfam_interfaces::SourceError;

    #[tokio::test]
    async fn test_lookup_takes_first_definition() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("word", "run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "definitions": ["", "move swiftly on foot", "operate"],
                "etymology": "from Old English"
            })))
            .mount(&mock_server)
            .await;

        let source = WordDataSource::new(mock_server.uri(), Duration::from_secs(2)).unwrap();
        let meta = source.lookup("run").await.unwrap();
        assert_eq!(meta.definition.as_deref(), Some("move swiftly on foot"));
        assert_eq!(meta.etymology.as_deref(), Some("from Old English"));
        assert!(meta.usage.is_none());
    }

    #[tokio::test]
    async fn test_lookup_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let source = WordDataSource::new(mock_server.uri(), Duration::from_millis(50)).unwrap();
        let error = source.lookup("run").await.unwrap_err();
        assert_eq!(error, SourceError::Timeout(50));
    }
}
