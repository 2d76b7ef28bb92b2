use std::sync::Arc;

use orchestrator::{ChatCompletionService, CompletionService, SearchProvider};
use providers::{CompletionClient, SerperClient};

use crate::config::ServerConfig;

/// Shared application state: only the run collaborators.
///
/// Run state itself is created fresh inside each request and never stored
/// here, so concurrent runs stay fully isolated.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn SearchProvider>,
    pub completion: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        let search = SerperClient::new(config.serper_api_key.clone());

        let completion_client = match &config.completion_base_url {
            Some(base_url) => {
                CompletionClient::with_base_url(config.completion_api_key.clone(), base_url)
            }
            None => CompletionClient::new(config.completion_api_key.clone()),
        };
        let completion = ChatCompletionService::with_models(
            completion_client,
            config.report_model.as_str(),
            config.summary_model.as_str(),
        );

        Self {
            search: Arc::new(search),
            completion: Arc::new(completion),
        }
    }

    /// Build state over arbitrary collaborators; used by tests.
    pub fn with_collaborators(
        search: Arc<dyn SearchProvider>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self { search, completion }
    }
}
