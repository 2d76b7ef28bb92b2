use protocol::PatchOp;
use research_core::{RunPhase, RunState};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{OrchestratorError, Result};
use crate::state_machine::PhaseMachine;

/// Typed address of a patchable field in [`RunState`].
///
/// The closed set keeps path handling exhaustive while the wire still
/// carries full JSON Pointer strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePath {
    Phase,
    Timestamp,
    Stage,
    Progress,
    InProgress,
    Sources,
    SourcesFound,
    ResearchCompleted,
    ProcessingCompleted,
    Report,
}

impl StatePath {
    /// The RFC 6901 JSON Pointer for this field.
    pub fn pointer(&self) -> &'static str {
        match self {
            Self::Phase => "/status/phase",
            Self::Timestamp => "/status/timestamp",
            Self::Stage => "/research/stage",
            Self::Progress => "/processing/progress",
            Self::InProgress => "/processing/inProgress",
            Self::Sources => "/research/sources",
            Self::SourcesFound => "/research/sources_found",
            Self::ResearchCompleted => "/research/completed",
            Self::ProcessingCompleted => "/processing/completed",
            Self::Report => "/processing/report",
        }
    }
}

/// Owns one run's mutable state.
///
/// A store belongs to exactly one run's single thread of control, so no
/// locking is involved. Every mutation goes through [`StateStore::set`],
/// which applies the change and returns the matching patch op in one step —
/// no observer can see one without the other.
#[derive(Debug)]
pub struct StateStore {
    message_id: Uuid,
    state: RunState,
}

impl StateStore {
    /// Initialize state for a fresh run with all fields at their defaults.
    pub fn create(message_id: Uuid, query: &str) -> Self {
        Self {
            message_id,
            state: RunState::new(query),
        }
    }

    pub fn message_id(&self) -> Uuid {
        self.message_id
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Mutate the field addressed by `path` and return the patch op.
    ///
    /// Enforces the run invariants: phase transitions must follow the
    /// forward order and progress never decreases.
    pub fn set(&mut self, path: StatePath, value: Value) -> Result<PatchOp> {
        match path {
            StatePath::Phase => {
                let to: RunPhase = serde_json::from_value(value.clone())?;
                PhaseMachine::validate_transition(&self.state.status.phase, &to)?;
                self.state.status.phase = to;
            }
            StatePath::Timestamp => {
                self.state.status.timestamp = serde_json::from_value(value.clone())?;
            }
            StatePath::Stage => {
                self.state.research.stage = serde_json::from_value(value.clone())?;
            }
            StatePath::Progress => {
                let to: f64 = serde_json::from_value(value.clone())?;
                let from = self.state.processing.progress;
                if to < from {
                    return Err(OrchestratorError::ProgressRegression { from, to });
                }
                self.state.processing.progress = to;
            }
            StatePath::InProgress => {
                self.state.processing.in_progress = serde_json::from_value(value.clone())?;
            }
            StatePath::Sources => {
                self.state.research.sources = serde_json::from_value(value.clone())?;
            }
            StatePath::SourcesFound => {
                self.state.research.sources_found = serde_json::from_value(value.clone())?;
            }
            StatePath::ResearchCompleted => {
                self.state.research.completed = serde_json::from_value(value.clone())?;
            }
            StatePath::ProcessingCompleted => {
                self.state.processing.completed = serde_json::from_value(value.clone())?;
            }
            StatePath::Report => {
                self.state.processing.report = serde_json::from_value(value.clone())?;
            }
        }

        Ok(PatchOp::replace(path.pointer(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> StateStore {
        StateStore::create(Uuid::new_v4(), "quantum computing")
    }

    #[test]
    fn test_create_initializes_defaults() {
        let store = store();
        assert_eq!(store.state().status.phase, RunPhase::Initialized);
        assert_eq!(store.state().research.query, "quantum computing");
        assert_eq!(store.state().processing.progress, 0.0);
    }

    #[test]
    fn test_set_mutates_and_returns_op() {
        let mut store = store();
        let op = store
            .set(StatePath::Progress, json!(0.2))
            .expect("progress update");

        assert_eq!(store.state().processing.progress, 0.2);
        assert_eq!(op.path, "/processing/progress");
        assert_eq!(op.value, json!(0.2));
    }

    #[test]
    fn test_set_phase_validates_transition() {
        let mut store = store();
        store
            .set(StatePath::Phase, json!("analyzing_information"))
            .expect("forward skip");

        let err = store
            .set(StatePath::Phase, json!("gathering_information"))
            .unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::InvalidTransition { .. }
        ));
        // State untouched on rejection.
        assert_eq!(
            store.state().status.phase,
            RunPhase::AnalyzingInformation
        );
    }

    #[test]
    fn test_progress_regression_rejected() {
        let mut store = store();
        store.set(StatePath::Progress, json!(0.5)).unwrap();

        let err = store.set(StatePath::Progress, json!(0.2)).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::ProgressRegression { .. }
        ));
        assert_eq!(store.state().processing.progress, 0.5);
    }

    #[test]
    fn test_progress_may_stay_equal() {
        let mut store = store();
        store.set(StatePath::Progress, json!(0.5)).unwrap();
        store.set(StatePath::Progress, json!(0.5)).unwrap();
        assert_eq!(store.state().processing.progress, 0.5);
    }

    #[test]
    fn test_set_sources_replaces_list() {
        let mut store = store();
        let sources = json!([
            {"title": "T", "url": "https://example.com", "snippet": "S"}
        ]);
        let op = store.set(StatePath::Sources, sources.clone()).unwrap();

        assert_eq!(store.state().research.sources.len(), 1);
        assert_eq!(op.path, "/research/sources");
        assert_eq!(op.value, sources);
    }

    #[test]
    fn test_set_report_accepts_string_and_null() {
        let mut store = store();
        store.set(StatePath::Report, json!("done")).unwrap();
        assert_eq!(store.state().processing.report.as_deref(), Some("done"));

        store.set(StatePath::Report, json!(null)).unwrap();
        assert!(store.state().processing.report.is_none());
    }

    #[test]
    fn test_rejects_malformed_value() {
        let mut store = store();
        assert!(store.set(StatePath::Progress, json!("fast")).is_err());
        assert!(store.set(StatePath::Phase, json!("warp_speed")).is_err());
    }
}
