use protocol::{AgentEvent, PatchOp};
use uuid::Uuid;

use crate::error::Result;
use crate::store::StateStore;

/// Turns state into protocol events.
pub struct PatchEncoder;

impl PatchEncoder {
    /// Serialize the entire state into a snapshot event.
    ///
    /// Called exactly once per run, before any phase executes; the
    /// exactly-once guard lives in [`crate::context::RunContext`].
    pub fn snapshot(store: &StateStore) -> Result<AgentEvent> {
        Ok(AgentEvent::StateSnapshot {
            message_id: store.message_id(),
            snapshot: serde_json::to_value(store.state())?,
        })
    }

    /// Wrap the ordered ops of one logical update into a delta event.
    pub fn delta(message_id: Uuid, ops: Vec<PatchOp>) -> AgentEvent {
        AgentEvent::StateDelta {
            message_id,
            delta: ops,
        }
    }
}
