use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::{stage, RunPhase};

/// A single research source discovered during the search phase.
///
/// Immutable once added to a run's state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Overall status of the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusSection {
    pub phase: RunPhase,
    /// Last-update instant, refreshed on every phase/stage change.
    pub timestamp: DateTime<Utc>,
}

/// Research-specific progress and gathered data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchSection {
    pub query: String,
    pub stage: String,
    pub sources_found: usize,
    pub sources: Vec<Source>,
    pub completed: bool,
}

/// Report-generation progress.
///
/// `inProgress` is camelCase on the wire while `sources_found` above is
/// snake_case; both spellings are part of the client contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessingSection {
    pub progress: f64,
    pub report: Option<String>,
    pub completed: bool,
    #[serde(rename = "inProgress")]
    pub in_progress: bool,
}

/// Display hints for the frontend. Part of the snapshot, never patched by
/// the current workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiSection {
    #[serde(rename = "showSources")]
    pub show_sources: bool,
    #[serde(rename = "showProgress")]
    pub show_progress: bool,
    #[serde(rename = "activeTab")]
    pub active_tab: String,
}

/// Complete mutable state of one research run.
///
/// Created fresh per request, owned by that run's single thread of control,
/// and discarded when the run ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunState {
    pub status: StatusSection,
    pub research: ResearchSection,
    pub processing: ProcessingSection,
    pub ui: UiSection,
}

impl RunState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            status: StatusSection {
                phase: RunPhase::Initialized,
                timestamp: Utc::now(),
            },
            research: ResearchSection {
                query: query.into(),
                stage: stage::NOT_STARTED.to_string(),
                sources_found: 0,
                sources: Vec::new(),
                completed: false,
            },
            processing: ProcessingSection {
                progress: 0.0,
                report: None,
                completed: false,
                in_progress: false,
            },
            ui: UiSection {
                show_sources: false,
                show_progress: true,
                active_tab: "chat".to_string(),
            },
        }
    }
}
