use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::patch::PatchOp;

/// All events streamed to the client during a run.
///
/// Each event serializes as one self-contained frame tagged with a
/// SCREAMING_SNAKE `type` and camelCase payload fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum AgentEvent {
    /// The run has started; always the first frame.
    #[serde(rename = "RUN_STARTED", rename_all = "camelCase")]
    RunStarted { thread_id: String, run_id: String },

    /// Full state serialization, emitted exactly once before any delta.
    #[serde(rename = "STATE_SNAPSHOT", rename_all = "camelCase")]
    StateSnapshot { message_id: Uuid, snapshot: Value },

    /// Ordered JSON-Patch operations for one logical state update.
    #[serde(rename = "STATE_DELTA", rename_all = "camelCase")]
    StateDelta {
        message_id: Uuid,
        delta: Vec<PatchOp>,
    },

    /// Start of the assistant's conversational reply.
    #[serde(rename = "TEXT_MESSAGE_START", rename_all = "camelCase")]
    TextMessageStart { message_id: Uuid, role: String },

    /// A chunk of the assistant's reply.
    #[serde(rename = "TEXT_MESSAGE_CONTENT", rename_all = "camelCase")]
    TextMessageContent { message_id: Uuid, delta: String },

    /// End of the assistant's reply.
    #[serde(rename = "TEXT_MESSAGE_END", rename_all = "camelCase")]
    TextMessageEnd { message_id: Uuid },

    /// Terminal frame; nothing follows it.
    #[serde(rename = "RUN_FINISHED", rename_all = "camelCase")]
    RunFinished { thread_id: String, run_id: String },
}

impl AgentEvent {
    /// The wire `type` tag, for logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "RUN_STARTED",
            Self::StateSnapshot { .. } => "STATE_SNAPSHOT",
            Self::StateDelta { .. } => "STATE_DELTA",
            Self::TextMessageStart { .. } => "TEXT_MESSAGE_START",
            Self::TextMessageContent { .. } => "TEXT_MESSAGE_CONTENT",
            Self::TextMessageEnd { .. } => "TEXT_MESSAGE_END",
            Self::RunFinished { .. } => "RUN_FINISHED",
        }
    }
}
