//! Wire protocol for research-run state synchronization.
//!
//! This crate provides the event types streamed to the client, the
//! JSON-Patch operations carried by delta events, and the FIFO buffer
//! the orchestrator drains at phase boundaries.

mod buffer;
mod events;
mod patch;

pub use buffer::EventBuffer;
pub use events::AgentEvent;
pub use patch::{PatchOp, PatchOpKind};
