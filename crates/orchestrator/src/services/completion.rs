use async_trait::async_trait;
use providers::{ChatMessage, CompletionClient, ProviderError};

use super::CompletionService;
use crate::prompts;

const DEFAULT_REPORT_MODEL: &str = "gpt-3.5-turbo-16k";
const DEFAULT_SUMMARY_MODEL: &str = "gpt-3.5-turbo";

// Lower temperature for the factual report, higher for the chatty reply.
const REPORT_TEMPERATURE: f32 = 0.5;
const REPORT_MAX_TOKENS: u32 = 4000;
const SUMMARY_TEMPERATURE: f32 = 0.7;
const SUMMARY_MAX_TOKENS: u32 = 150;

/// [`CompletionService`] backed by an OpenAI-compatible chat API.
///
/// The report model defaults to a larger-context variant since it receives
/// the full assembled research text.
#[derive(Clone)]
pub struct ChatCompletionService {
    client: CompletionClient,
    report_model: String,
    summary_model: String,
}

impl ChatCompletionService {
    pub fn new(client: CompletionClient) -> Self {
        Self::with_models(client, DEFAULT_REPORT_MODEL, DEFAULT_SUMMARY_MODEL)
    }

    pub fn with_models(
        client: CompletionClient,
        report_model: impl Into<String>,
        summary_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            report_model: report_model.into(),
            summary_model: summary_model.into(),
        }
    }
}

#[async_trait]
impl CompletionService for ChatCompletionService {
    async fn generate_report(&self, research_text: &str) -> Result<String, ProviderError> {
        self.client
            .chat_completion(
                vec![
                    ChatMessage::system(prompts::REPORT_SYSTEM),
                    ChatMessage::user(research_text),
                ],
                &self.report_model,
                Some(REPORT_TEMPERATURE),
                Some(REPORT_MAX_TOKENS),
            )
            .await
    }

    async fn generate_summary(
        &self,
        query: &str,
        report_excerpt: &str,
    ) -> Result<String, ProviderError> {
        self.client
            .chat_completion(
                vec![
                    ChatMessage::system(prompts::SUMMARY_SYSTEM),
                    ChatMessage::user(format!(
                        "Query: {query}\n\nReport summary: {report_excerpt}..."
                    )),
                ],
                &self.summary_model,
                Some(SUMMARY_TEMPERATURE),
                Some(SUMMARY_MAX_TOKENS),
            )
            .await
    }
}
