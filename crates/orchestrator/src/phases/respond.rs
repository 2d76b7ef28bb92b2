use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::{NextPhase, PhaseData, PhaseKind, WorkflowPhase};
use crate::context::RunContext;
use crate::error::{OrchestratorError, Result};
use crate::services::CompletionService;

const REPORT_EXCERPT_CHARS: usize = 500;

/// Deterministic reply used whenever summary generation fails.
pub fn fallback_reply(query: &str) -> String {
    format!(
        "I've completed your research on '{query}'. \
         You can find the detailed analysis in the report above."
    )
}

/// Final phase: produce the short conversational reply.
///
/// Failures here never abort the run; the fallback reply keeps the
/// protocol stream intact.
pub struct RespondPhase {
    completion: Arc<dyn CompletionService>,
}

impl RespondPhase {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

#[async_trait]
impl WorkflowPhase for RespondPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Respond
    }

    fn next(&self) -> NextPhase {
        NextPhase::End
    }

    async fn execute(&self, input: PhaseData, ctx: &mut RunContext) -> Result<PhaseData> {
        let PhaseData::Report(report) = input else {
            return Err(OrchestratorError::UnexpectedPhaseInput { phase: self.kind() });
        };

        let query = ctx.query().to_string();
        let excerpt: String = report.chars().take(REPORT_EXCERPT_CHARS).collect();

        let reply = match self.completion.generate_summary(&query, &excerpt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "Summary generation failed, using fallback reply");
                fallback_reply(&query)
            }
        };

        Ok(PhaseData::Reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_reply_references_query() {
        let reply = fallback_reply("quantum computing");
        assert!(reply.contains("'quantum computing'"));
        assert!(reply.contains("report above"));
    }
}
