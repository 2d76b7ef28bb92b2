//! Orchestration of research runs.
//!
//! One run owns a [`StateStore`], mutates it through typed paths that yield
//! JSON-Patch operations, buffers the resulting events in causal order, and
//! flushes them to the transport at phase boundaries. Phases execute in a
//! fixed Search → Report → Respond order against pluggable collaborators.

pub mod context;
pub mod encoder;
pub mod error;
pub mod phases;
pub mod pipeline;
pub mod prompts;
pub mod services;
pub mod state_machine;
pub mod store;
pub mod transport;

pub use context::RunContext;
pub use encoder::PatchEncoder;
pub use error::{OrchestratorError, Result, TransportError};
pub use pipeline::{PhasePlan, PipelineOrchestrator, RunRequest};
pub use services::{ChatCompletionService, CompletionService, SearchProvider};
pub use state_machine::PhaseMachine;
pub use store::{StatePath, StateStore};
pub use transport::{ChannelTransport, RunTransport};
