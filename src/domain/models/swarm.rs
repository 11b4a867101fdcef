//! Swarm domain model
//!
//! Value types for one DragonFire swarm run: the per-member request
//! descriptor, its settled outcome, and the aggregate report.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Lowest temperature in the ramp
pub const BASE_TEMPERATURE: f64 = 0.8;

/// Increment between consecutive temperatures in the ramp
pub const TEMPERATURE_STEP: f64 = 0.02;

/// Number of distinct temperatures before the ramp repeats
pub const TEMPERATURE_PERIOD: usize = 10;

/// Temperature assigned to the swarm member at `sequence_index`.
///
/// Produces the repeating ramp 0.80, 0.82, ..., 0.98.
pub fn temperature_for(sequence_index: usize) -> f64 {
    BASE_TEMPERATURE + (sequence_index % TEMPERATURE_PERIOD) as f64 * TEMPERATURE_STEP
}

/// Largest swarm one run will dispatch
pub const MAX_SWARM_SIZE: usize = 10_000;

/// Number of members dispatched in one swarm run. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SwarmSize(NonZeroUsize);

impl SwarmSize {
    /// Default swarm size used when the caller gives nothing usable
    pub const DEFAULT: Self = Self(match NonZeroUsize::new(663) {
        Some(size) => size,
        None => NonZeroUsize::MIN,
    });

    /// Create a swarm size, rejecting zero
    pub const fn new(size: usize) -> Option<Self> {
        match NonZeroUsize::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// Resolve a caller-supplied size.
    ///
    /// Missing, non-finite and non-positive values fall back to `default`.
    /// Positive values are floored; a value that floors to zero also falls
    /// back to `default`. Huge values saturate rather than wrap, so the
    /// result can exceed [`MAX_SWARM_SIZE`]; the runner rejects those.
    pub fn resolve(requested: Option<f64>, default: Self) -> Self {
        requested
            .filter(|size| size.is_finite() && *size > 0.0)
            .and_then(|size| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let floored = size.floor() as usize;
                Self::new(floored)
            })
            .unwrap_or(default)
    }

    /// Size as a plain count
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Whether one run may dispatch this many members
    pub const fn is_dispatchable(self) -> bool {
        self.get() <= MAX_SWARM_SIZE
    }
}

impl Default for SwarmSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for SwarmSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "swarm size must be at least 1".to_string())
    }
}

impl From<SwarmSize> for usize {
    fn from(size: SwarmSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for SwarmSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single outbound call descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmRequest {
    /// Prompt shared by every member of the swarm
    pub prompt: Arc<str>,
    /// Sampling temperature derived from `sequence_index`
    pub temperature: f64,
    /// 0-based position in dispatch order
    pub sequence_index: usize,
}

impl SwarmRequest {
    /// Build the descriptor for the member at `sequence_index`
    pub fn new(prompt: Arc<str>, sequence_index: usize) -> Self {
        Self {
            prompt,
            temperature: temperature_for(sequence_index),
            sequence_index,
        }
    }
}

/// Result of one settled swarm member. Failure reasons are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwarmOutcome {
    /// Member yielded usable text
    Success {
        /// Extracted, trimmed text
        text: String,
    },
    /// Member failed or returned nothing usable
    Failure,
}

impl SwarmOutcome {
    /// Surviving text, if any
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure => None,
        }
    }
}

/// Aggregate result of one dispatch-collect-select run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwarmReport {
    winning_text: String,
    total_dispatched: usize,
    survivor_count: usize,
    divergence_fraction: f64,
}

impl SwarmReport {
    /// Build a report; the divergence fraction is derived, and the survivor
    /// count is clamped to the dispatched total.
    pub fn new(winning_text: String, total_dispatched: usize, survivor_count: usize) -> Self {
        let survivor_count = survivor_count.min(total_dispatched);
        Self {
            winning_text,
            total_dispatched,
            survivor_count,
            divergence_fraction: divergence_fraction(total_dispatched, survivor_count),
        }
    }

    /// Crowned text
    pub fn winning_text(&self) -> &str {
        &self.winning_text
    }

    /// Members dispatched
    pub const fn total_dispatched(&self) -> usize {
        self.total_dispatched
    }

    /// Members that yielded text
    pub const fn survivor_count(&self) -> usize {
        self.survivor_count
    }

    /// Share of members that failed, in 0..=1
    pub const fn divergence_fraction(&self) -> f64 {
        self.divergence_fraction
    }

    /// Divergence as a whole percentage, rounded half up
    pub fn divergence_percent(&self) -> u32 {
        divergence_percent(self.divergence_fraction)
    }

    /// Consume the report, keeping only the winning text
    pub fn into_winning_text(self) -> String {
        self.winning_text
    }
}

/// Fraction of dispatched members that did not survive.
///
/// Defined as 1 when nothing was dispatched.
#[allow(clippy::cast_precision_loss)]
pub fn divergence_fraction(total_dispatched: usize, survivor_count: usize) -> f64 {
    if total_dispatched == 0 {
        return 1.0;
    }
    let survivors = survivor_count.min(total_dispatched);
    1.0 - survivors as f64 / total_dispatched as f64
}

/// Round a divergence fraction to the nearest whole percent, half up
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn divergence_percent(fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0 + 0.5).floor() as u32
}
