//! Valyria: finds the one canonical deck among its duplicates.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument, warn};

use super::{samples, AgentContext, ChaosAgent};
use crate::domain::errors::AgentError;
use crate::domain::models::{AgentResult, ChaosInput, DeckFile, Truth};

/// Route and CLI name
pub const NAME: &str = "valyria";
const CACHE_PREFIX: &str = "valyria_";
const LOST_DECK: &str = "Lost in OneDrive hell";

/// Highest-scoring file; the first one wins ties
pub fn pick_canonical(files: &[DeckFile]) -> Option<usize> {
    files
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, i64)>, (index, file)| {
            let score = file.score();
            match best {
                Some((_, top)) if top >= score => best,
                _ => Some((index, score)),
            }
        })
        .map(|(index, _)| index)
}

/// Unique web URLs in first-seen order
fn receipts(files: &[DeckFile]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for url in files.iter().filter_map(|file| file.web_url.as_deref()) {
        if !urls.iter().any(|seen| seen == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

fn system_prompt(dupes: usize, canonical: &str) -> String {
    format!(
        "You are Valyria, dragon of truth. Roast Microsoft dupes: {dupes} copies burn, \
         this canonical survives: \"{canonical}\". GoT style: savage, hilarious."
    )
}

/// Deck agent
pub struct ValyriaAgent {
    context: AgentContext,
}

impl ValyriaAgent {
    /// Agent over the shared context
    pub fn new(context: AgentContext) -> Self {
        Self { context }
    }

    async fn files(&self, query: &str) -> Vec<DeckFile> {
        match self.context.records.search_files(query).await {
            Ok(files) if !files.is_empty() => files,
            Ok(_) => samples::deck_files(query, Utc::now()),
            Err(err) => {
                warn!(error = %err, "deck search failed, using sample decks");
                samples::deck_files(query, Utc::now())
            }
        }
    }
}

#[async_trait]
impl ChaosAgent for ValyriaAgent {
    fn name(&self) -> &'static str {
        NAME
    }

    #[instrument(skip(self, input), fields(agent = NAME))]
    async fn execute(&self, input: &ChaosInput) -> Result<AgentResult, AgentError> {
        let source = input.input.as_str();
        if let Some(cached) = self.context.cached(CACHE_PREFIX, source) {
            return Ok(cached);
        }

        let files = self.files(source).await;
        let canonical = pick_canonical(&files);
        let dupes = files.len() - usize::from(canonical.is_some());
        let canonical_name = canonical
            .and_then(|index| files[index].name.clone())
            .unwrap_or_else(|| LOST_DECK.to_string());

        info!(files = files.len(), dupes, canonical = %canonical_name, "canonical deck chosen");

        let user = if source.is_empty() {
            canonical_name.as_str()
        } else {
            source
        };
        let roast = self
            .context
            .roast(&system_prompt(dupes, &canonical_name), user)
            .await?;

        let result = AgentResult {
            roast,
            truth: Truth {
                canonical: canonical_name,
                receipts: receipts(&files),
                ..Truth::default()
            },
        };
        self.context.store(CACHE_PREFIX, source, &result)?;
        Ok(result)
    }
}
