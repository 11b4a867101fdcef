//! DragonFire: one prompt, a swarm of samples, one crowned roast.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write as _;
use tracing::info;

use crate::domain::errors::SwarmError;
use crate::domain::models::SwarmSize;
use crate::services::swarm::SwarmRunner;

/// Status line of every successful DragonFire run
pub const STATUS_ROARING: &str = "Winter is roaring";

const DEFAULT_TARGET: &str = "Microsoft";
const DEFAULT_MODE: &str = "roast";

/// Caller-supplied DragonFire parameters, all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragonFireRequest {
    /// Who to roast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Roast mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Requested member count; non-positive values use the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swarm_size: Option<f64>,
}

impl DragonFireRequest {
    /// Read a request body leniently.
    ///
    /// Fields of the wrong type are ignored, and anything that is not an
    /// object is an empty request.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            target: text("target"),
            mode: text("mode"),
            swarm_size: value.get("swarmSize").and_then(Value::as_f64),
        }
    }

    /// Same as [`from_value`](Self::from_value) over raw bytes; unparseable
    /// input is an empty request
    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// Trimmed target, `Microsoft` when missing or blank
    pub fn resolved_target(&self) -> String {
        non_blank(self.target.as_deref()).unwrap_or(DEFAULT_TARGET).to_string()
    }

    /// Trimmed mode, `roast` when missing or blank
    pub fn resolved_mode(&self) -> String {
        non_blank(self.mode.as_deref()).unwrap_or(DEFAULT_MODE).to_string()
    }

    /// Requested size, or `default` when unusable
    pub fn resolved_size(&self, default: SwarmSize) -> SwarmSize {
        SwarmSize::resolve(self.swarm_size, default)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Prompt every swarm member receives
pub fn build_prompt(target: &str, mode: &str) -> String {
    format!(
        "Roast {target} on {mode}. Channel Jon Snow's deadpan or a White Walker's undead efficiency.\n\
         \n\
         Output:\n\
         - One savage, self-contained markdown receipt.\n\
         - Then a compact JSON blob with keys {{ \"theme\", \"crime\", \"verdict\" }} suitable for glyph notarization.\n\
         No preamble, no explanation, just roast + JSON."
    )
}

/// Outcome of one DragonFire run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragonFireReport {
    /// Always "success"
    pub status: String,
    /// Crowned roast
    pub roast: String,
    /// Divergence in whole percent
    pub divergence: u32,
    /// Resolved target
    pub target: String,
    /// Resolved mode
    pub mode: String,
    /// Members dispatched
    pub swarm_size: usize,
    /// Members that yielded text
    pub survivors: usize,
}

impl DragonFireReport {
    /// Markdown receipt of the run
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "**DragonFire report for {}**", self.target);
        let _ = writeln!(out);
        let _ = writeln!(out, "- Mode: `{}`", self.mode);
        let _ = writeln!(out, "- Swarm size: `{}`", self.swarm_size);
        let _ = writeln!(out, "- Survivors: `{}`", self.survivors);
        let _ = writeln!(out, "- Divergence: `{}%`", self.divergence);
        let _ = writeln!(out);
        let _ = writeln!(out, "### Crowned roast");
        let _ = writeln!(out);
        out.push_str(&self.roast);
        out
    }
}

/// Normalizes DragonFire requests and runs them through the swarm
#[derive(Clone)]
pub struct DragonFireService {
    runner: SwarmRunner,
    default_size: SwarmSize,
}

impl DragonFireService {
    /// Service using `default_size` when a request gives none
    pub fn new(runner: SwarmRunner, default_size: SwarmSize) -> Self {
        Self {
            runner,
            default_size,
        }
    }

    /// Run one DragonFire request end to end
    pub async fn ignite(&self, request: &DragonFireRequest) -> Result<DragonFireReport, SwarmError> {
        let target = request.resolved_target();
        let mode = request.resolved_mode();
        let size = request.resolved_size(self.default_size);
        let prompt = build_prompt(&target, &mode);

        info!(%target, %mode, swarm_size = size.get(), "igniting DragonFire");

        let report = self.runner.run(&prompt, size).await?;
        Ok(DragonFireReport {
            status: STATUS_ROARING.to_string(),
            divergence: report.divergence_percent(),
            target,
            mode,
            swarm_size: report.total_dispatched(),
            survivors: report.survivor_count(),
            roast: report.into_winning_text(),
        })
    }
}
