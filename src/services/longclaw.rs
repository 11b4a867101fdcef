//! Longclaw: classify chaos, run the matching agent, fuse one final roast.

use tracing::{info, instrument};

use crate::domain::errors::AgentError;
use crate::domain::models::{AgentResult, ChaosInput, ChaosKind, LongclawResult, Truth};
use crate::services::agents::{AgentContext, AgentRoster};

const CACHE_PREFIX: &str = "longclaw_";
const EMPTY_ROAST: &str = "Longclaw finds no chaos to cut, only an empty SharePoint page and a \
                           thousand pending approvals.";

/// Fusion prompt naming whatever truths the agent produced
pub fn fusion_prompt(truth: &Truth) -> String {
    format!(
        "You are Longclaw, Jon Snow's sword. Fuse the bells' truths into one immutable artifact. \
         Roast the full chaos: SHAME. SHAME. SHAME. Valyria: {}, Walk: {}, Bell: {}. \
         GoT style: final cut, perfect hair.",
        truth.canonical,
        truth.changes.join(", "),
        truth.resolution
    )
}

/// Keep only the truth fields the agent for `kind` owns
fn relevant_truth(kind: ChaosKind, truth: Truth) -> Truth {
    let Truth {
        canonical,
        changes,
        resolution,
        receipts,
    } = truth;
    match kind {
        ChaosKind::Deck => Truth {
            canonical,
            receipts,
            ..Truth::default()
        },
        ChaosKind::Prd => Truth {
            changes,
            receipts,
            ..Truth::default()
        },
        ChaosKind::Ticket => Truth {
            resolution,
            receipts,
            ..Truth::default()
        },
    }
}

/// Routes chaos to exactly one agent and fuses the result
#[derive(Clone)]
pub struct LongclawOrchestrator {
    context: AgentContext,
    agents: AgentRoster,
}

impl LongclawOrchestrator {
    /// Orchestrator over a custom roster
    pub fn new(context: AgentContext, agents: AgentRoster) -> Self {
        Self { context, agents }
    }

    /// Orchestrator over the built-in agents
    pub fn standard(context: AgentContext) -> Self {
        let agents = AgentRoster::standard(&context);
        Self::new(context, agents)
    }

    /// Agents this orchestrator routes to
    pub fn agents(&self) -> &AgentRoster {
        &self.agents
    }

    /// Classify `input`, run the matching agent and fuse the result
    ///
    /// # Errors
    /// Propagates the agent failure.
    #[instrument(skip(self, input))]
    pub async fn execute(&self, input: &ChaosInput) -> Result<LongclawResult, AgentError> {
        let source = input.input.trim();
        if source.is_empty() {
            return Ok(LongclawResult {
                kind: None,
                result: AgentResult {
                    roast: EMPTY_ROAST.to_string(),
                    truth: Truth::default(),
                },
            });
        }

        let kind = input.classify();
        if let Some(cached) = self.context.cached(CACHE_PREFIX, source) {
            return Ok(LongclawResult {
                kind: Some(kind),
                result: cached,
            });
        }

        let agent = self.agents.for_kind(kind);
        info!(%kind, agent = agent.name(), "longclaw dispatching");
        let AgentResult { roast, truth } = agent.execute(input).await?;
        let truth = relevant_truth(kind, truth);

        let fused = self.context.roast(&fusion_prompt(&truth), source).await?;
        let roast = if roast.is_empty() {
            fused
        } else {
            format!("{roast}\n\n{fused}")
        };

        let result = AgentResult { roast, truth };
        self.context.store(CACHE_PREFIX, source, &result)?;
        Ok(LongclawResult {
            kind: Some(kind),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fusion_prompt() {
        let truth = Truth {
            canonical: "v1.7".to_string(),
            changes: vec!["a walked: x".to_string(), "b walked: y".to_string()],
            resolution: String::new(),
            receipts: Vec::new(),
        };
        let prompt = fusion_prompt(&truth);
        assert!(prompt.contains("SHAME. SHAME. SHAME. Valyria: v1.7, Walk: a walked: x, b walked: y, Bell: ."));
        assert!(prompt.ends_with("GoT style: final cut, perfect hair."));
    }

    #[test]
    fn test_relevant_truth() {
        let full = Truth {
            canonical: "deck".to_string(),
            changes: vec!["change".to_string()],
            resolution: "fixed".to_string(),
            receipts: vec!["r".to_string()],
        };
        let deck = relevant_truth(ChaosKind::Deck, full.clone());
        assert_eq!(deck.canonical, "deck");
        assert!(deck.changes.is_empty());
        assert!(deck.resolution.is_empty());

        let ticket = relevant_truth(ChaosKind::Ticket, full);
        assert_eq!(ticket.resolution, "fixed");
        assert!(ticket.canonical.is_empty());
        assert_eq!(ticket.receipts, vec!["r"]);
    }
}
