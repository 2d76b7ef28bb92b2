use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("completion response contained no choices")]
    EmptyCompletion,
}

impl ProviderError {
    pub fn api(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Api {
            message: message.into(),
            status_code,
        }
    }
}
