use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Role in a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Response from the chat completions endpoint
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

/// A choice in a chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible chat completion API.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CompletionClient {
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

    /// Request one completion and return the first choice's content.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, ProviderError> {
        debug!(
            model,
            message_count = messages.len(),
            "Creating chat completion"
        );

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                error!(
                    status = status.as_u16(),
                    "Completion API error: {}", error_resp.error.message
                );
                return Err(ProviderError::api(
                    error_resp.error.message,
                    Some(status.as_u16()),
                ));
            }

            return Err(ProviderError::api(error_text, Some(status.as_u16())));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ProviderError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_chat_completion_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "A report."}},
                    {"message": {"role": "assistant", "content": "Ignored."}}
                ]
            })))
            .mount(&server)
            .await;

        let client = CompletionClient::with_base_url("key", server.uri());
        let content = client
            .chat_completion(
                vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
                "gpt-3.5-turbo",
                Some(0.5),
                Some(100),
            )
            .await
            .unwrap();

        assert_eq!(content, "A report.");
    }

    #[tokio::test]
    async fn test_chat_completion_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = CompletionClient::with_base_url("key", server.uri());
        let err = client
            .chat_completion(vec![ChatMessage::user("hi")], "m", None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_chat_completion_parses_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API key", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let client = CompletionClient::with_base_url("bad", server.uri());
        let err = client
            .chat_completion(vec![ChatMessage::user("hi")], "m", None, None)
            .await
            .unwrap_err();

        match err {
            ProviderError::Api {
                message,
                status_code,
            } => {
                assert_eq!(message, "Invalid API key");
                assert_eq!(status_code, Some(401));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
