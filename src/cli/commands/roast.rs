//! `shame roast`

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::application::ShameServices;
use crate::cli::output::{output, summary_table, truncate, CommandOutput};
use crate::domain::models::{ChaosInput, ChaosKind, Config, LongclawResult};

/// Roast with its truth table
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RoastOutput(LongclawResult);

impl CommandOutput for RoastOutput {
    fn to_human(&self) -> String {
        let truth = &self.0.result.truth;
        let kind = self.0.kind.map_or("none", ChaosKind::as_str);
        let receipts = truth
            .receipts
            .iter()
            .map(|receipt| truncate(receipt, 96))
            .collect::<Vec<_>>()
            .join("\n");
        let table = summary_table([
            ("Kind", kind.to_string()),
            ("Canonical", truth.canonical.clone()),
            ("Changes", truth.changes.join("\n")),
            ("Resolution", truth.resolution.clone()),
            ("Receipts", receipts),
        ]);
        format!("{}\n\n{table}", self.0.result.roast)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }
}

/// Roast `input` through Longclaw, or through one agent when `agent` is set
///
/// # Errors
/// Fails without an API key, for an unknown agent name, or when the agent call fails.
pub async fn execute(
    input: String,
    kind: Option<ChaosKind>,
    agent: Option<String>,
    config: &Config,
    json_mode: bool,
) -> Result<()> {
    let services = ShameServices::from_config(config)?;

    let result = match agent {
        Some(name) => {
            let agent = services
                .longclaw
                .agents()
                .by_name(&name)
                .ok_or_else(|| anyhow!("Unknown agent: {name}. Must be one of: valyria, walk, bell"))?;
            LongclawResult {
                kind: None,
                result: agent.execute(&ChaosInput::new(input)).await?,
            }
        }
        None => {
            let mut chaos = ChaosInput::new(input.trim());
            chaos.kind = kind;
            services.longclaw.execute(&chaos).await?
        }
    };

    output(&RoastOutput(result), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AgentResult, Truth};

    #[test]
    fn test_human_output_lists_truth() {
        let out = RoastOutput(LongclawResult {
            kind: Some(ChaosKind::Ticket),
            result: AgentResult {
                roast: "400 pings".to_string(),
                truth: Truth {
                    resolution: "buried".to_string(),
                    receipts: vec!["2024-01-01T00:00:00.000Z".to_string()],
                    ..Truth::default()
                },
            },
        });
        let human = out.to_human();
        assert!(human.starts_with("400 pings"));
        assert!(human.contains("ticket"));
        assert!(human.contains("buried"));
        assert_eq!(out.to_json()["type"], "ticket");
    }
}
