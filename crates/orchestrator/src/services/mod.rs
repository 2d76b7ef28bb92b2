//! Collaborator contracts and their adapters over the provider clients.
//!
//! Phases depend only on these traits, so tests and future backends swap in
//! without touching the pipeline.

mod completion;
mod search;

pub use completion::ChatCompletionService;

use async_trait::async_trait;
use providers::{ProviderError, SearchResponse};

/// Web-search collaborator.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, ProviderError>;
}

/// Completion collaborator for report and reply generation.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Produce the detailed multi-section report from assembled research
    /// text.
    async fn generate_report(&self, research_text: &str) -> Result<String, ProviderError>;

    /// Produce the short conversational reply. May fail; callers recover
    /// with a deterministic fallback.
    async fn generate_summary(
        &self,
        query: &str,
        report_excerpt: &str,
    ) -> Result<String, ProviderError>;
}
