//! Core domain model for research runs.
//!
//! This crate holds the run-state data structures shared between the
//! orchestrator and the server. It is pure data: no IO, no transport.

mod phase;
mod run;

pub use phase::{stage, RunPhase};
pub use run::{ProcessingSection, ResearchSection, RunState, Source, StatusSection, UiSection};
