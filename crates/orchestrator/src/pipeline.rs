use std::sync::Arc;

use protocol::AgentEvent;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::RunContext;
use crate::error::{OrchestratorError, Result};
use crate::phases::{
    fallback_reply, NextPhase, PhaseData, PhaseKind, ReportPhase, RespondPhase, SearchPhase,
    WorkflowPhase,
};
use crate::services::{CompletionService, SearchProvider};
use crate::transport::RunTransport;

/// One run's input, taken from the transport's start-run call.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub thread_id: String,
    pub run_id: String,
    pub query: String,
}

/// The phase graph: a designated entry node plus nodes whose `next()`
/// edges end in the [`NextPhase::End`] sentinel.
///
/// The research plan is the linear Search → Report → Respond path;
/// the walk itself makes no linearity assumption.
pub struct PhasePlan {
    entry: PhaseKind,
    phases: Vec<Box<dyn WorkflowPhase>>,
}

impl PhasePlan {
    /// The standard research plan over the given collaborators.
    pub fn research(
        search: Arc<dyn SearchProvider>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            entry: PhaseKind::Search,
            phases: vec![
                Box::new(SearchPhase::new(search)),
                Box::new(ReportPhase::new(completion.clone())),
                Box::new(RespondPhase::new(completion)),
            ],
        }
    }

    pub fn entry(&self) -> PhaseKind {
        self.entry
    }

    fn phase(&self, kind: PhaseKind) -> Result<&dyn WorkflowPhase> {
        self.phases
            .iter()
            .find(|phase| phase.kind() == kind)
            .map(|phase| phase.as_ref())
            .ok_or(OrchestratorError::PhaseNotInPlan(kind))
    }
}

/// Drives one run: snapshot, phases in plan order, terminal events.
///
/// Buffered events are flushed to the transport after the snapshot and
/// after every phase — never mid-phase — so the client observes state
/// changes batched but in causal order.
pub struct PipelineOrchestrator {
    plan: PhasePlan,
}

impl PipelineOrchestrator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self::with_plan(PhasePlan::research(search, completion))
    }

    pub fn with_plan(plan: PhasePlan) -> Self {
        Self { plan }
    }

    /// Execute the run end to end.
    ///
    /// The client receives `RUN_FINISHED` on every path except a fatal
    /// transport failure, which aborts the stream without a terminal
    /// event.
    pub async fn run<T: RunTransport>(&self, request: RunRequest, transport: &mut T) -> Result<()> {
        info!(
            thread_id = %request.thread_id,
            run_id = %request.run_id,
            query = %request.query,
            "Research run started"
        );

        transport
            .send(AgentEvent::RunStarted {
                thread_id: request.thread_id.clone(),
                run_id: request.run_id.clone(),
            })
            .await?;

        let message_id = Uuid::new_v4();
        let mut ctx = RunContext::new(message_id, &request.query);

        ctx.emit_snapshot()?;
        transport.flush(ctx.buffer_mut()).await?;

        ctx.set_in_progress(true)?;

        let reply = match self.execute_phases(&request.query, &mut ctx, transport).await {
            Ok(reply) => reply,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                warn!(error = %err, run_id = %request.run_id, "Phase failed, marking run failed");
                ctx.fail()?;
                transport.flush(ctx.buffer_mut()).await?;
                fallback_reply(&request.query)
            }
        };

        transport.send_text(message_id, &reply).await?;
        transport
            .send(AgentEvent::RunFinished {
                thread_id: request.thread_id.clone(),
                run_id: request.run_id.clone(),
            })
            .await?;

        info!(run_id = %request.run_id, "Research run finished");
        Ok(())
    }

    /// Walk the plan from the entry node until the terminal sentinel,
    /// flushing at every phase boundary.
    async fn execute_phases<T: RunTransport>(
        &self,
        query: &str,
        ctx: &mut RunContext,
        transport: &mut T,
    ) -> Result<String> {
        let mut data = PhaseData::Query(query.to_string());
        let mut cursor = NextPhase::Kind(self.plan.entry());

        while let NextPhase::Kind(kind) = cursor {
            let phase = self.plan.phase(kind)?;
            debug!(phase = %kind, "Executing phase");

            let result = phase.execute(data, ctx).await;
            // Flush even on failure so updates buffered before the error
            // still reach the client in order.
            transport.flush(ctx.buffer_mut()).await?;
            data = result?;
            cursor = phase.next();
        }

        match data {
            PhaseData::Reply(reply) => Ok(reply),
            _ => Err(OrchestratorError::MissingReply),
        }
    }
}
