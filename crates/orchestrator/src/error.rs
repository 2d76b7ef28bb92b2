use thiserror::Error;
use uuid::Uuid;

use crate::phases::PhaseKind;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("invalid phase transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("progress regressed from {from} to {to}")]
    ProgressRegression { from: f64, to: f64 },

    #[error("snapshot already emitted for message {0}")]
    SnapshotAlreadyEmitted(Uuid),

    #[error("state encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("phase {phase} received unexpected input")]
    UnexpectedPhaseInput { phase: PhaseKind },

    #[error("phase {0} missing from plan")]
    PhaseNotInPlan(PhaseKind),

    #[error("phase plan terminated without producing a reply")]
    MissingReply,

    #[error("report generation failed: {0}")]
    ReportGeneration(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl OrchestratorError {
    /// Fatal errors abort the stream without a terminal event; everything
    /// else degrades and the client still sees `RUN_FINISHED`.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Failures pushing frames to the remote client.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("event channel closed by receiver")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
