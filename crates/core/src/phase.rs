use serde::{Deserialize, Serialize};

/// Coarse-grained workflow phase of a research run.
///
/// Phases advance in a single fixed order; `Completed` and `Failed` are
/// terminal. The wire names below are part of the client contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Initialized,
    GatheringInformation,
    AnalyzingInformation,
    GeneratingReport,
    Completed,
    Failed,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::GatheringInformation => "gathering_information",
            Self::AnalyzingInformation => "analyzing_information",
            Self::GeneratingReport => "generating_report",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "initialized" => Some(Self::Initialized),
            "gathering_information" => Some(Self::GatheringInformation),
            "analyzing_information" => Some(Self::AnalyzingInformation),
            "generating_report" => Some(Self::GeneratingReport),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Terminal phases admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained stage names within a phase.
///
/// Stages are free-form strings on the wire; these constants cover the
/// stages the current workflow emits.
pub mod stage {
    pub const NOT_STARTED: &str = "not_started";
    pub const SEARCHING: &str = "searching";
    pub const ORGANIZING_DATA: &str = "organizing_data";
    pub const CREATING_DETAILED_REPORT: &str = "creating_detailed_report";
    pub const REPORT_COMPLETE: &str = "report_complete";
    pub const FAILED: &str = "failed";
}
