use research_core::RunPhase;

use crate::error::{OrchestratorError, Result};

/// Validates run-phase transitions.
///
/// Phases form a single total order; transitions may skip forward (a
/// degraded run completes straight from `GatheringInformation`) but never
/// regress. `Failed` is reachable from any non-terminal phase.
pub struct PhaseMachine;

impl PhaseMachine {
    pub fn validate_transition(from: &RunPhase, to: &RunPhase) -> Result<()> {
        if Self::is_allowed(from, to) {
            Ok(())
        } else {
            Err(OrchestratorError::InvalidTransition {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }

    pub fn can_transition(from: &RunPhase, to: &RunPhase) -> bool {
        Self::is_allowed(from, to)
    }

    fn is_allowed(from: &RunPhase, to: &RunPhase) -> bool {
        if from.is_terminal() {
            return false;
        }
        if *to == RunPhase::Failed {
            return true;
        }
        match (Self::order(from), Self::order(to)) {
            (Some(from_idx), Some(to_idx)) => to_idx >= from_idx,
            _ => false,
        }
    }

    /// Position in the forward order; `Failed` sits outside it.
    fn order(phase: &RunPhase) -> Option<u8> {
        match phase {
            RunPhase::Initialized => Some(0),
            RunPhase::GatheringInformation => Some(1),
            RunPhase::AnalyzingInformation => Some(2),
            RunPhase::GeneratingReport => Some(3),
            RunPhase::Completed => Some(4),
            RunPhase::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(PhaseMachine::can_transition(
            &RunPhase::Initialized,
            &RunPhase::GatheringInformation
        ));
        assert!(PhaseMachine::can_transition(
            &RunPhase::GatheringInformation,
            &RunPhase::AnalyzingInformation
        ));
        assert!(PhaseMachine::can_transition(
            &RunPhase::AnalyzingInformation,
            &RunPhase::GeneratingReport
        ));
        assert!(PhaseMachine::can_transition(
            &RunPhase::GeneratingReport,
            &RunPhase::Completed
        ));
    }

    #[test]
    fn test_forward_skips_allowed() {
        // Degraded runs complete straight from the search phase.
        assert!(PhaseMachine::can_transition(
            &RunPhase::GatheringInformation,
            &RunPhase::Completed
        ));
        assert!(PhaseMachine::can_transition(
            &RunPhase::Initialized,
            &RunPhase::Completed
        ));
    }

    #[test]
    fn test_regression_rejected() {
        assert!(!PhaseMachine::can_transition(
            &RunPhase::AnalyzingInformation,
            &RunPhase::GatheringInformation
        ));
        assert!(!PhaseMachine::can_transition(
            &RunPhase::GeneratingReport,
            &RunPhase::Initialized
        ));
    }

    #[test]
    fn test_failed_reachable_from_any_non_terminal() {
        for phase in [
            RunPhase::Initialized,
            RunPhase::GatheringInformation,
            RunPhase::AnalyzingInformation,
            RunPhase::GeneratingReport,
        ] {
            assert!(PhaseMachine::can_transition(&phase, &RunPhase::Failed));
        }
    }

    #[test]
    fn test_terminal_phases_admit_nothing() {
        assert!(!PhaseMachine::can_transition(
            &RunPhase::Completed,
            &RunPhase::Failed
        ));
        assert!(!PhaseMachine::can_transition(
            &RunPhase::Failed,
            &RunPhase::Completed
        ));
        assert!(!PhaseMachine::can_transition(
            &RunPhase::Completed,
            &RunPhase::Completed
        ));
    }

    #[test]
    fn test_self_transition_allowed_when_not_terminal() {
        assert!(PhaseMachine::can_transition(
            &RunPhase::GatheringInformation,
            &RunPhase::GatheringInformation
        ));
    }

    #[test]
    fn test_validate_reports_phase_names() {
        let err = PhaseMachine::validate_transition(
            &RunPhase::GeneratingReport,
            &RunPhase::GatheringInformation,
        )
        .unwrap_err();
        assert!(err.to_string().contains("generating_report"));
        assert!(err.to_string().contains("gathering_information"));
    }
}
