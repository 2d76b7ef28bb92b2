//! HTTP clients for the external research collaborators.
//!
//! Two fixed-contract services back the workflow: the Serper web-search API
//! and an OpenAI-compatible chat completion API. Failures are reported, not
//! retried; degradation policy lives with the caller.

mod completion;
mod error;
mod serper;

pub use completion::{ChatChoice, ChatCompletionResponse, ChatMessage, CompletionClient, Role};
pub use error::ProviderError;
pub use serper::{OrganicResult, PeopleAlsoAsk, RelatedSearch, SearchResponse, SerperClient};
