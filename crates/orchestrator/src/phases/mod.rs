//! Phase implementations for the research pipeline.
//!
//! The workflow is a fixed linear path today — [`SearchPhase`] →
//! [`ReportPhase`] → [`RespondPhase`] — but phases are wired as nodes with
//! explicit `next()` edges ending in [`NextPhase::End`], so conditional or
//! parallel edges slot in without reshaping the trait.

mod report;
mod respond;
mod search;

pub use report::ReportPhase;
pub use respond::{fallback_reply, RespondPhase};
pub use search::{CompiledResults, SearchPhase};

use async_trait::async_trait;

use crate::context::RunContext;
use crate::error::Result;

/// Sentinel report text for the degraded no-results path.
pub const NO_RESULTS_MESSAGE: &str = "No relevant research results were found on the topic.";

/// Identifies a phase node in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Search,
    Report,
    Respond,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::Report => "report",
            Self::Respond => "respond",
        };
        f.write_str(name)
    }
}

/// Edge target: another phase node or the terminal sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPhase {
    Kind(PhaseKind),
    End,
}

/// Value flowing along the phase edges.
#[derive(Debug, Clone)]
pub enum PhaseData {
    /// The user's research query; the entry input.
    Query(String),
    /// Search phase output, structured or degraded.
    Search(SearchOutput),
    /// The detailed report text.
    Report(String),
    /// The conversational reply; the terminal output.
    Reply(String),
}

/// Search result, tagged instead of string-sniffed so downstream phases
/// match on it exhaustively.
#[derive(Debug, Clone)]
pub enum SearchOutput {
    Results(CompiledResults),
    /// Degraded path; `message` doubles as the report verbatim.
    Unavailable { message: String },
}

/// A node in the phase plan.
#[async_trait]
pub trait WorkflowPhase: Send + Sync {
    fn kind(&self) -> PhaseKind;

    /// Outgoing edge. [`NextPhase::End`] terminates the walk.
    fn next(&self) -> NextPhase;

    /// Run the phase against the run's state handle.
    ///
    /// Emission is synchronous and buffered: implementations mutate state
    /// through `ctx` and never touch the transport.
    async fn execute(&self, input: PhaseData, ctx: &mut RunContext) -> Result<PhaseData>;
}
