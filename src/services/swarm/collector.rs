//! Settlement collection: turn settled calls into survivors.

use tracing::debug;

use crate::domain::errors::SwarmError;
use crate::domain::models::SwarmOutcome;

use super::dispatcher::Settlement;

/// Classify one settled call.
///
/// Rejected calls and envelopes without extractable text are failures.
pub fn settle(settlement: Settlement) -> SwarmOutcome {
    match settlement.result {
        Ok(envelope) => envelope.first_text().map_or_else(
            || {
                debug!(
                    sequence_index = settlement.sequence_index,
                    "swarm member returned no text"
                );
                SwarmOutcome::Failure
            },
            |text| SwarmOutcome::Success { text },
        ),
        Err(_) => SwarmOutcome::Failure,
    }
}

/// Surviving texts in dispatch order.
///
/// Fails with `TotalFailure` when nothing survives.
pub fn collect_survivors(settlements: Vec<Settlement>) -> Result<Vec<String>, SwarmError> {
    let dispatched = settlements.len();
    let survivors: Vec<String> = settlements
        .into_iter()
        .filter_map(|settlement| settle(settlement).into_text())
        .collect();

    if survivors.is_empty() {
        return Err(SwarmError::TotalFailure { dispatched });
    }
    Ok(survivors)
}
