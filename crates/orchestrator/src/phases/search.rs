use std::sync::Arc;

use async_trait::async_trait;
use providers::{OrganicResult, PeopleAlsoAsk, RelatedSearch, SearchResponse};
use research_core::{stage, RunPhase, Source};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{NextPhase, PhaseData, PhaseKind, SearchOutput, WorkflowPhase, NO_RESULTS_MESSAGE};
use crate::context::RunContext;
use crate::error::{OrchestratorError, Result};
use crate::services::SearchProvider;

const ORGANIC_LIMIT: usize = 5;
const RELATED_LIMIT: usize = 3;
const PEOPLE_ALSO_ASK_LIMIT: usize = 3;

/// Search results truncated to what the report works from.
#[derive(Debug, Clone)]
pub struct CompiledResults {
    pub organic: Vec<OrganicResult>,
    pub knowledge_graph: Option<Map<String, Value>>,
    pub related_searches: Vec<RelatedSearch>,
    pub people_also_ask: Vec<PeopleAlsoAsk>,
}

impl CompiledResults {
    /// Truncate a raw response: organic to top 5, related searches and
    /// people-also-ask to top 3, empty knowledge graph normalized to
    /// absent.
    pub fn from_response(mut response: SearchResponse) -> Self {
        response.organic.truncate(ORGANIC_LIMIT);
        response.related_searches.truncate(RELATED_LIMIT);
        response.people_also_ask.truncate(PEOPLE_ALSO_ASK_LIMIT);
        Self {
            organic: response.organic,
            knowledge_graph: response.knowledge_graph.filter(|graph| !graph.is_empty()),
            related_searches: response.related_searches,
            people_also_ask: response.people_also_ask,
        }
    }

    /// Source entries for the state, with display defaults for missing
    /// fields.
    pub fn sources(&self) -> Vec<Source> {
        self.organic
            .iter()
            .map(|result| Source {
                title: result
                    .title
                    .clone()
                    .unwrap_or_else(|| "No title".to_string()),
                url: result.resolved_url(),
                snippet: result
                    .snippet
                    .clone()
                    .unwrap_or_else(|| "No preview".to_string()),
            })
            .collect()
    }
}

/// First phase: query the web-search collaborator and record sources.
pub struct SearchPhase {
    provider: Arc<dyn SearchProvider>,
}

impl SearchPhase {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl WorkflowPhase for SearchPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Search
    }

    fn next(&self) -> NextPhase {
        NextPhase::Kind(PhaseKind::Report)
    }

    async fn execute(&self, input: PhaseData, ctx: &mut RunContext) -> Result<PhaseData> {
        let PhaseData::Query(query) = input else {
            return Err(OrchestratorError::UnexpectedPhaseInput { phase: self.kind() });
        };

        debug!(query = %query, "Searching");
        ctx.update_phase(RunPhase::GatheringInformation, stage::SEARCHING, Some(0.2))?;

        let output = match self.provider.search(&query).await {
            Ok(response) if response.organic.is_empty() => {
                debug!("No search results found");
                SearchOutput::Unavailable {
                    message: NO_RESULTS_MESSAGE.to_string(),
                }
            }
            Ok(response) => {
                debug!(organic = response.organic.len(), "Search results received");
                let compiled = CompiledResults::from_response(response);
                ctx.add_sources(compiled.sources())?;
                ctx.update_phase(
                    RunPhase::AnalyzingInformation,
                    stage::ORGANIZING_DATA,
                    Some(0.5),
                )?;
                SearchOutput::Results(compiled)
            }
            Err(err) => {
                warn!(error = %err, "Search provider unavailable, degrading");
                SearchOutput::Unavailable {
                    message: NO_RESULTS_MESSAGE.to_string(),
                }
            }
        };

        Ok(PhaseData::Search(output))
    }
}
