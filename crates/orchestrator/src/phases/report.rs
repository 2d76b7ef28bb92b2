use std::sync::Arc;

use async_trait::async_trait;
use research_core::{stage, RunPhase};
use serde_json::{Map, Value};
use tracing::debug;

use super::search::CompiledResults;
use super::{NextPhase, PhaseData, PhaseKind, SearchOutput, WorkflowPhase};
use crate::context::RunContext;
use crate::error::{OrchestratorError, Result};
use crate::services::CompletionService;

const SECTION_SEPARATOR: &str = "\n\n===\n\n";

// Knowledge-graph metadata keys that carry no prose.
const KNOWLEDGE_GRAPH_SKIP_KEYS: [&str; 3] = ["type", "title", "imageUrl"];

/// Second phase: assemble research text and generate the detailed report,
/// then mark the run complete in one atomic delta.
///
/// A degraded search output short-circuits: the sentinel message becomes
/// the report verbatim, with no completion call.
pub struct ReportPhase {
    completion: Arc<dyn CompletionService>,
}

impl ReportPhase {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl WorkflowPhase for ReportPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Report
    }

    fn next(&self) -> NextPhase {
        NextPhase::Kind(PhaseKind::Respond)
    }

    async fn execute(&self, input: PhaseData, ctx: &mut RunContext) -> Result<PhaseData> {
        let PhaseData::Search(output) = input else {
            return Err(OrchestratorError::UnexpectedPhaseInput { phase: self.kind() });
        };

        match output {
            SearchOutput::Unavailable { message } => {
                debug!("Search degraded, passing sentinel through as report");
                ctx.complete(&message)?;
                Ok(PhaseData::Report(message))
            }
            SearchOutput::Results(results) => {
                ctx.update_phase(
                    RunPhase::GeneratingReport,
                    stage::CREATING_DETAILED_REPORT,
                    Some(0.8),
                )?;

                let research = compile_research_text(&results);
                debug!(research_length = research.len(), "Creating detailed report");

                let report = self
                    .completion
                    .generate_report(&research)
                    .await
                    .map_err(|err| OrchestratorError::ReportGeneration(err.to_string()))?;
                debug!(report_length = report.len(), "Report generated");

                ctx.complete(&report)?;
                Ok(PhaseData::Report(report))
            }
        }
    }
}

/// Join the non-empty research sections into one text blob for the
/// completion collaborator.
pub(crate) fn compile_research_text(results: &CompiledResults) -> String {
    let sections = [
        organic_section(results),
        knowledge_graph_section(results.knowledge_graph.as_ref()),
        related_searches_section(results),
        people_also_ask_section(results),
    ];

    sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

fn organic_section(results: &CompiledResults) -> String {
    results
        .organic
        .iter()
        .map(|result| {
            format!(
                "Title: {}\nSnippet: {}\nLink: {}",
                result.title.as_deref().unwrap_or("No title"),
                result.snippet.as_deref().unwrap_or("No preview"),
                result.resolved_url()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn knowledge_graph_section(graph: Option<&Map<String, Value>>) -> String {
    let Some(graph) = graph else {
        return String::new();
    };

    let items: Vec<String> = graph
        .iter()
        .filter(|(key, _)| !KNOWLEDGE_GRAPH_SKIP_KEYS.contains(&key.as_str()))
        .map(|(key, value)| {
            let rendered = match value {
                Value::Array(values) => values
                    .iter()
                    .map(value_text)
                    .collect::<Vec<_>>()
                    .join(", "),
                other => value_text(other),
            };
            format!("{key}: {rendered}")
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }

    let title = graph
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("the topic");
    format!("Knowledge Graph about {title}:\n{}", items.join("\n"))
}

fn related_searches_section(results: &CompiledResults) -> String {
    if results.related_searches.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = results
        .related_searches
        .iter()
        .map(|related| format!("- {}", related.query))
        .collect();
    format!("Related Searches:\n{}", lines.join("\n"))
}

fn people_also_ask_section(results: &CompiledResults) -> String {
    let items: Vec<String> = results
        .people_also_ask
        .iter()
        .filter_map(|entry| {
            let question = entry.question.as_deref()?;
            let answer = entry.snippet.as_deref().unwrap_or("No answer available");
            Some(format!("Q: {question}\nA: {answer}"))
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }
    format!("People Also Ask:\n{}", items.join("\n\n"))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
