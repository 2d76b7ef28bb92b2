use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";

/// One organic search result.
///
/// Serper is inconsistent about `link` vs `url`, so both are kept and the
/// caller picks with [`OrganicResult::resolved_url`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
}

impl OrganicResult {
    /// Prefer `link`, fall back to `url`, then empty.
    pub fn resolved_url(&self) -> String {
        self.link
            .clone()
            .or_else(|| self.url.clone())
            .unwrap_or_default()
    }
}

/// A related-search suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedSearch {
    pub query: String,
}

/// A "people also ask" entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PeopleAlsoAsk {
    pub question: Option<String>,
    pub snippet: Option<String>,
}

/// Structured response from the Serper search endpoint.
///
/// Every section is optional in practice; missing sections deserialize to
/// their empty form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
    /// Knowledge panel attributes, open-shaped by design.
    #[serde(default)]
    pub knowledge_graph: Option<Map<String, Value>>,
    #[serde(default)]
    pub related_searches: Vec<RelatedSearch>,
    #[serde(default)]
    pub people_also_ask: Vec<PeopleAlsoAsk>,
}

/// Client for the Serper web-search API.
#[derive(Clone)]
pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Run one web search. Not retried; callers degrade on failure.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, ProviderError> {
        debug!(query, "Searching via Serper");

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(error_text, Some(status.as_u16())));
        }

        let results: SearchResponse = response.json().await?;
        debug!(
            organic = results.organic.len(),
            has_knowledge_graph = results.knowledge_graph.is_some(),
            "Serper results received"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_parses_full_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "test-key"))
            .and(body_json(json!({"q": "rust"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [
                    {"title": "Rust", "link": "https://rust-lang.org", "snippet": "A language"},
                    {"title": "Rust book", "url": "https://doc.rust-lang.org/book"}
                ],
                "knowledgeGraph": {"title": "Rust", "type": "Programming language"},
                "relatedSearches": [{"query": "rust tutorial"}],
                "peopleAlsoAsk": [{"question": "Is Rust fast?", "snippet": "Yes."}]
            })))
            .mount(&server)
            .await;

        let client = SerperClient::with_base_url("test-key", server.uri());
        let results = client.search("rust").await.unwrap();

        assert_eq!(results.organic.len(), 2);
        assert_eq!(results.organic[0].resolved_url(), "https://rust-lang.org");
        assert_eq!(
            results.organic[1].resolved_url(),
            "https://doc.rust-lang.org/book"
        );
        assert!(results.knowledge_graph.is_some());
        assert_eq!(results.related_searches[0].query, "rust tutorial");
        assert_eq!(
            results.people_also_ask[0].question.as_deref(),
            Some("Is Rust fast?")
        );
    }

    #[tokio::test]
    async fn test_search_defaults_missing_sections() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = SerperClient::with_base_url("k", server.uri());
        let results = client.search("anything").await.unwrap();

        assert!(results.organic.is_empty());
        assert!(results.knowledge_graph.is_none());
        assert!(results.related_searches.is_empty());
        assert!(results.people_also_ask.is_empty());
    }

    #[tokio::test]
    async fn test_search_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = SerperClient::with_base_url("bad-key", server.uri());
        let err = client.search("rust").await.unwrap_err();

        match err {
            ProviderError::Api {
                message,
                status_code,
            } => {
                assert_eq!(message, "forbidden");
                assert_eq!(status_code, Some(403));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
