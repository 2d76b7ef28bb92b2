use async_trait::async_trait;
use providers::{ProviderError, SearchResponse, SerperClient};

use super::SearchProvider;

#[async_trait]
impl SearchProvider for SerperClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, ProviderError> {
        SerperClient::search(self, query).await
    }
}
