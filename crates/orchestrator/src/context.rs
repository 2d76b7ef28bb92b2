use chrono::Utc;
use protocol::{EventBuffer, PatchOp};
use research_core::{stage, RunPhase, RunState, Source};
use serde_json::json;
use uuid::Uuid;

use crate::encoder::PatchEncoder;
use crate::error::{OrchestratorError, Result};
use crate::store::{StatePath, StateStore};

/// Per-run execution context handed through every phase call.
///
/// Owns the run's state store and event buffer. Each update method applies
/// its mutations and buffers exactly one event, so a drained batch replays
/// the updates in causal order.
pub struct RunContext {
    store: StateStore,
    buffer: EventBuffer,
    snapshot_emitted: bool,
}

impl RunContext {
    pub fn new(message_id: Uuid, query: &str) -> Self {
        Self {
            store: StateStore::create(message_id, query),
            buffer: EventBuffer::new(),
            snapshot_emitted: false,
        }
    }

    pub fn message_id(&self) -> Uuid {
        self.store.message_id()
    }

    pub fn query(&self) -> &str {
        &self.store.state().research.query
    }

    pub fn state(&self) -> &RunState {
        self.store.state()
    }

    pub fn buffer_mut(&mut self) -> &mut EventBuffer {
        &mut self.buffer
    }

    fn push_delta(&mut self, ops: Vec<PatchOp>) {
        let message_id = self.store.message_id();
        self.buffer.push(PatchEncoder::delta(message_id, ops));
    }

    /// Buffer the full-state snapshot. Exactly once per run.
    pub fn emit_snapshot(&mut self) -> Result<()> {
        if self.snapshot_emitted {
            return Err(OrchestratorError::SnapshotAlreadyEmitted(
                self.store.message_id(),
            ));
        }
        let event = PatchEncoder::snapshot(&self.store)?;
        self.buffer.push(event);
        self.snapshot_emitted = true;
        Ok(())
    }

    /// Advance phase and stage, refreshing the timestamp and optionally
    /// the progress, as one delta.
    pub fn update_phase(
        &mut self,
        phase: RunPhase,
        stage: &str,
        progress: Option<f64>,
    ) -> Result<()> {
        let mut ops = vec![
            self.store
                .set(StatePath::Phase, serde_json::to_value(phase)?)?,
            self.store.set(StatePath::Stage, json!(stage))?,
            self.store
                .set(StatePath::Timestamp, serde_json::to_value(Utc::now())?)?,
        ];
        if let Some(progress) = progress {
            ops.push(self.store.set(StatePath::Progress, json!(progress))?);
        }
        self.push_delta(ops);
        Ok(())
    }

    pub fn set_in_progress(&mut self, in_progress: bool) -> Result<()> {
        let op = self.store.set(StatePath::InProgress, json!(in_progress))?;
        self.push_delta(vec![op]);
        Ok(())
    }

    /// Append sources and update the count as one delta. Sources only ever
    /// grow within a run; no deduplication.
    pub fn add_sources(&mut self, sources: Vec<Source>) -> Result<()> {
        let mut combined = self.store.state().research.sources.clone();
        combined.extend(sources);
        let count = combined.len();

        let ops = vec![
            self.store
                .set(StatePath::Sources, serde_json::to_value(&combined)?)?,
            self.store.set(StatePath::SourcesFound, json!(count))?,
        ];
        self.push_delta(ops);
        Ok(())
    }

    /// Mark the run complete with its final report.
    ///
    /// All completion fields travel in a single delta so no observer can
    /// see a partially-completed state.
    pub fn complete(&mut self, report: &str) -> Result<()> {
        let ops = vec![
            self.store
                .set(StatePath::Phase, serde_json::to_value(RunPhase::Completed)?)?,
            self.store
                .set(StatePath::Stage, json!(stage::REPORT_COMPLETE))?,
            self.store.set(StatePath::ResearchCompleted, json!(true))?,
            self.store.set(StatePath::ProcessingCompleted, json!(true))?,
            self.store.set(StatePath::InProgress, json!(false))?,
            self.store.set(StatePath::Report, json!(report))?,
            self.store.set(StatePath::Progress, json!(1.0))?,
        ];
        self.push_delta(ops);
        Ok(())
    }

    /// Mark the run failed. No-op if the run already reached a terminal
    /// phase.
    pub fn fail(&mut self) -> Result<()> {
        if self.store.state().status.phase.is_terminal() {
            return Ok(());
        }
        let ops = vec![
            self.store
                .set(StatePath::Phase, serde_json::to_value(RunPhase::Failed)?)?,
            self.store.set(StatePath::Stage, json!(stage::FAILED))?,
            self.store.set(StatePath::InProgress, json!(false))?,
        ];
        self.push_delta(ops);
        Ok(())
    }
}
