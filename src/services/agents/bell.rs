//! Bell: digs the buried resolution out of an endless ticket.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{instrument, warn};

use super::{samples, AgentContext, ChaosAgent};
use crate::domain::errors::AgentError;
use crate::domain::models::{AgentResult, ChaosInput, TicketComment, Truth};

/// Route and CLI name
pub const NAME: &str = "bell";
const CACHE_PREFIX: &str = "bell_";
const EMPTY_ROAST: &str =
    "The bell tolls for an empty ticket: 0 repro steps, 0 logs, 400 pings of pure anxiety.";
const EMPTY_RESOLUTION: &str = "No ticket, only Teams ghosts.";
const RESOLUTION_ID: &str = "312";
const BURIED: &str = "buried by intern who left";
const ANONYMOUS_AUTHOR: &str = "anonymous Teams ping";
const PROMPT_WINDOW: usize = 10;
const SYSTEM_PROMPT: &str = "You are the Bell, tolling for Microsoft's undead tickets. Roast the \
                             400-comment hell: resolution buried, close it forever. GoT style: \
                             executioner's mercy.";

/// Resolution summary drawn from comment #312
pub fn resolution(comments: &[TicketComment]) -> String {
    let text = comments
        .iter()
        .find(|comment| comment.id.as_deref() == Some(RESOLUTION_ID))
        .and_then(|comment| comment.content.as_deref())
        .unwrap_or(BURIED);
    format!("Resolution from comment #{RESOLUTION_ID}: {text}. 400 pings wasted.")
}

/// The last ten comments, one per line
fn transcript(comments: &[TicketComment]) -> String {
    comments[comments.len().saturating_sub(PROMPT_WINDOW)..]
        .iter()
        .map(|comment| {
            format!(
                "#{} by {}: {}",
                comment.id.as_deref().unwrap_or("?"),
                comment.author.as_deref().unwrap_or(ANONYMOUS_AUTHOR),
                comment.content.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unique comment timestamps in order
fn receipts(comments: &[TicketComment]) -> Vec<String> {
    let mut stamps: Vec<String> = Vec::new();
    for stamp in comments
        .iter()
        .filter_map(|comment| comment.created_at)
        .map(samples::receipt_stamp)
    {
        if !stamps.contains(&stamp) {
            stamps.push(stamp);
        }
    }
    stamps
}

/// Ticket agent
pub struct BellAgent {
    context: AgentContext,
}

impl BellAgent {
    /// Agent over the shared context
    pub fn new(context: AgentContext) -> Self {
        Self { context }
    }

    async fn comments(&self, ticket: &str) -> Vec<TicketComment> {
        match self.context.records.comments(ticket).await {
            Ok(comments) if !comments.is_empty() => comments,
            Ok(_) => samples::ticket_comments(ticket, Utc::now()),
            Err(err) => {
                warn!(error = %err, "comment lookup failed, using sample thread");
                samples::ticket_comments(ticket, Utc::now())
            }
        }
    }
}

#[async_trait]
impl ChaosAgent for BellAgent {
    fn name(&self) -> &'static str {
        NAME
    }

    #[instrument(skip(self, input), fields(agent = NAME))]
    async fn execute(&self, input: &ChaosInput) -> Result<AgentResult, AgentError> {
        let source = input.input.trim();
        if source.is_empty() {
            return Ok(AgentResult {
                roast: EMPTY_ROAST.to_string(),
                truth: Truth {
                    resolution: EMPTY_RESOLUTION.to_string(),
                    ..Truth::default()
                },
            });
        }

        if let Some(cached) = self.context.cached(CACHE_PREFIX, source) {
            return Ok(cached);
        }

        let comments = self.comments(source).await;
        let lines = transcript(&comments);
        let user = if lines.is_empty() { source } else { lines.as_str() };
        let roast = self.context.roast(SYSTEM_PROMPT, user).await?;

        let result = AgentResult {
            roast,
            truth: Truth {
                resolution: resolution(&comments),
                receipts: receipts(&comments),
                ..Truth::default()
            },
        };
        self.context.store(CACHE_PREFIX, source, &result)?;
        Ok(result)
    }
}
