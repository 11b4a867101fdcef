//! Chaos input, classification, and agent results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of chaos a piece of input describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChaosKind {
    /// Duplicated slide deck
    Deck,
    /// Mutated product spec
    Prd,
    /// Endless support ticket
    Ticket,
}

impl ChaosKind {
    /// Lowercase wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deck => "deck",
            Self::Prd => "prd",
            Self::Ticket => "ticket",
        }
    }

    /// Classify free text by keyword
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("deck") || lower.contains(".ppt") {
            Self::Deck
        } else if lower.contains("prd") || lower.contains("spec") {
            Self::Prd
        } else {
            Self::Ticket
        }
    }
}

impl fmt::Display for ChaosKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChaosKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deck" => Ok(Self::Deck),
            "prd" => Ok(Self::Prd),
            "ticket" => Ok(Self::Ticket),
            other => Err(format!(
                "Invalid chaos kind: {other}. Must be one of: deck, prd, ticket"
            )),
        }
    }
}

/// Free-text chaos with an optional explicit category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosInput {
    /// Chaos text: deck name, PRD title or ticket id
    pub input: String,

    /// Explicit category; detected from the text when absent
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChaosKind>,
}

impl ChaosInput {
    /// Input without an explicit category
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            kind: None,
        }
    }

    /// Force the category
    pub fn with_kind(mut self, kind: ChaosKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Explicit kind if given, keyword classification otherwise
    pub fn classify(&self) -> ChaosKind {
        self.kind
            .unwrap_or_else(|| ChaosKind::detect(&self.input))
    }
}

/// Structured summary extracted alongside a roast
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truth {
    /// Surviving original among duplicates
    #[serde(default)]
    pub canonical: String,

    /// Who changed what
    #[serde(default)]
    pub changes: Vec<String>,

    /// Buried resolution
    #[serde(default)]
    pub resolution: String,

    /// Evidence: URLs or timestamps
    #[serde(default)]
    pub receipts: Vec<String>,
}

/// Roast plus truth, as produced by an agent or the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    /// Roast text
    pub roast: String,
    /// Facts behind the roast
    pub truth: Truth,
}

/// Orchestrator output: the agent result plus the category that handled it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongclawResult {
    /// Category of the input; absent when there was nothing to classify
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChaosKind>,

    /// Roast and truth from the handling agent
    #[serde(flatten)]
    pub result: AgentResult,
}
