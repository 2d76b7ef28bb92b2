use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::Stream;
use orchestrator::{ChannelTransport, PipelineOrchestrator, RunRequest};
use protocol::AgentEvent;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

pub const RUN_EVENT_CHANNEL_CAPACITY: usize = 64;
pub const SSE_KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Input for starting an agent run.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunAgentInput {
    pub thread_id: String,
    pub run_id: String,
    pub messages: Vec<InputMessage>,
}

/// One conversation message; the last one carries the research query.
#[derive(Debug, Deserialize, ToSchema)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

fn event_to_sse(event: &AgentEvent) -> Result<Event, Infallible> {
    let data = serde_json::to_string(event).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Failed to encode event frame");
        "{}".to_string()
    });
    Ok(Event::default().data(data))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = RunAgentInput,
    responses(
        (status = 200, description = "SSE stream of run events, ending after RUN_FINISHED"),
        (status = 400, description = "Empty message list"),
    ),
    tag = "runs"
)]
pub async fn start_run(
    State(state): State<AppState>,
    Json(input): Json<RunAgentInput>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let query = input
        .messages
        .last()
        .map(|message| message.content.clone())
        .ok_or_else(|| AppError::BadRequest("messages must not be empty".to_string()))?;

    let request = RunRequest {
        thread_id: input.thread_id,
        run_id: input.run_id,
        query,
    };

    let orchestrator = PipelineOrchestrator::new(state.search.clone(), state.completion.clone());
    let (tx, rx) = mpsc::channel(RUN_EVENT_CHANNEL_CAPACITY);

    // The run owns its own state and transport; the response only holds
    // the receiving end. Dropping the sender ends the stream after the
    // terminal event.
    tokio::spawn(async move {
        let mut transport = ChannelTransport::new(tx);
        if let Err(err) = orchestrator.run(request, &mut transport).await {
            tracing::error!(error = %err, "Research run aborted");
        }
    });

    let stream = ReceiverStream::new(rx).map(|event| event_to_sse(&event));

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(SSE_KEEP_ALIVE_INTERVAL)
            .text("keep-alive"),
    ))
}
