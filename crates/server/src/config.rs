use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_REPORT_MODEL: &str = "gpt-3.5-turbo-16k";
const DEFAULT_SUMMARY_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Server configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub serper_api_key: String,
    pub completion_api_key: String,
    /// Override for the completion API base URL (self-hosted gateways).
    pub completion_base_url: Option<String>,
    pub report_model: String,
    pub summary_model: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            serper_api_key: require("SERPER_API_KEY")?,
            completion_api_key: require("OPENAI_API_KEY")?,
            completion_base_url: std::env::var("OPENAI_BASE_URL").ok(),
            report_model: env_or("REPORT_MODEL", DEFAULT_REPORT_MODEL),
            summary_model: env_or("SUMMARY_MODEL", DEFAULT_SUMMARY_MODEL),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnv(name))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
