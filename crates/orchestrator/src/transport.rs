use async_trait::async_trait;
use protocol::{AgentEvent, EventBuffer};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::TransportError;

const ASSISTANT_ROLE: &str = "assistant";

/// Push side of the event stream.
///
/// The orchestrator only suspends for transport at phase boundaries, so an
/// implementation may batch however it likes as long as `send` preserves
/// call order.
#[async_trait]
pub trait RunTransport: Send {
    async fn send(&mut self, event: AgentEvent) -> Result<(), TransportError>;

    /// Drain the buffer and push every event in the order produced.
    async fn flush(&mut self, buffer: &mut EventBuffer) -> Result<(), TransportError> {
        for event in buffer.drain() {
            self.send(event).await?;
        }
        Ok(())
    }

    /// Push the final text response as its start/content/end triple.
    async fn send_text(&mut self, message_id: Uuid, text: &str) -> Result<(), TransportError> {
        self.send(AgentEvent::TextMessageStart {
            message_id,
            role: ASSISTANT_ROLE.to_string(),
        })
        .await?;
        self.send(AgentEvent::TextMessageContent {
            message_id,
            delta: text.to_string(),
        })
        .await?;
        self.send(AgentEvent::TextMessageEnd { message_id }).await
    }
}

/// Transport over a bounded mpsc channel; the server side turns the
/// receiver into the SSE body. A closed channel means the client is gone —
/// the fatal transport failure.
pub struct ChannelTransport {
    tx: mpsc::Sender<AgentEvent>,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::Sender<AgentEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl RunTransport for ChannelTransport {
    async fn send(&mut self, event: AgentEvent) -> Result<(), TransportError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| TransportError::ChannelClosed)
    }
}

/// In-memory capture, mostly for tests.
#[async_trait]
impl RunTransport for Vec<AgentEvent> {
    async fn send(&mut self, event: AgentEvent) -> Result<(), TransportError> {
        self.push(event);
        Ok(())
    }
}
