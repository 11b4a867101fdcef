//! Swarm dispatch: build one descriptor per member and issue every call
//! concurrently.

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::CompletionError;
use crate::domain::models::{CompletionEnvelope, CompletionRequest, SwarmRequest, SwarmSize};
use crate::domain::ports::CompletionClient;

/// One settled member call, tagged with its dispatch position
#[derive(Debug)]
pub struct Settlement {
    /// Dispatch position of the member
    pub sequence_index: usize,
    /// Envelope or call failure
    pub result: Result<CompletionEnvelope, CompletionError>,
}

/// Lazily yield `size` request descriptors sharing one prompt
pub fn build_requests(prompt: &str, size: SwarmSize) -> impl Iterator<Item = SwarmRequest> {
    let prompt: Arc<str> = Arc::from(prompt);
    (0..size.get()).map(move |index| SwarmRequest::new(Arc::clone(&prompt), index))
}

/// Issue every request and wait for all of them to settle.
///
/// With no `max_in_flight` all calls are started at once. With a limit, at
/// most that many are in flight. Either way the returned settlements are in
/// dispatch order and one exists per request.
pub async fn dispatch(
    client: &dyn CompletionClient,
    model: &str,
    requests: impl IntoIterator<Item = SwarmRequest>,
    max_in_flight: Option<usize>,
) -> Vec<Settlement> {
    let calls = requests
        .into_iter()
        .map(|request| call_member(client, model, request));

    match max_in_flight.filter(|limit| *limit > 0) {
        None => join_all(calls).await,
        Some(limit) => {
            let mut settled: Vec<Settlement> =
                stream::iter(calls).buffer_unordered(limit).collect().await;
            settled.sort_by_key(|settlement| settlement.sequence_index);
            settled
        }
    }
}

async fn call_member(
    client: &dyn CompletionClient,
    model: &str,
    request: SwarmRequest,
) -> Settlement {
    let completion =
        CompletionRequest::prompt(model, request.prompt.as_ref(), request.temperature);
    let result = client.complete(completion).await;

    if let Err(ref err) = result {
        debug!(
            sequence_index = request.sequence_index,
            error = %err,
            "swarm member failed"
        );
    }

    Settlement {
        sequence_index: request.sequence_index,
        result,
    }
}
