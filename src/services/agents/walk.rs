//! Walk: parades the last edits of a mutated spec.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{instrument, warn};

use super::{samples, AgentContext, ChaosAgent};
use crate::domain::errors::AgentError;
use crate::domain::models::{AgentResult, ChaosInput, DocVersion, SizeDelta, Truth};

/// Route and CLI name
pub const NAME: &str = "walk";
const CACHE_PREFIX: &str = "walk_";
const EMPTY_ROAST: &str =
    "The Septa sees no PRD, only an empty Confluence page and a thousand unchecked boxes.";
const ANONYMOUS_AUTHOR: &str = "anonymous PM in Redmond";
const DEFAULT_CHANGE: &str = "ethics clause deleted";
const DIFF_WINDOW: usize = 3;

/// Who changed what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    /// Author of the change
    pub user: String,
    /// What changed
    pub change: String,
}

impl Diff {
    fn line(&self) -> String {
        format!("{} walked: {}", self.user, self.change)
    }
}

fn describe(delta: Option<&SizeDelta>) -> String {
    match delta {
        Some(SizeDelta::Bytes(bytes)) => format!("{bytes} bytes of shame"),
        Some(SizeDelta::Description(text)) => text.clone(),
        None => DEFAULT_CHANGE.to_string(),
    }
}

/// Diffs for the last three versions
pub fn build_diffs(versions: &[DocVersion]) -> Vec<Diff> {
    let tail = &versions[versions.len().saturating_sub(DIFF_WINDOW)..];
    tail.iter()
        .map(|version| Diff {
            user: version
                .author
                .clone()
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            change: describe(version.size_delta.as_ref()),
        })
        .collect()
}

fn system_prompt(versions: usize) -> String {
    format!(
        "You are the Septa, forcing Microsoft liars to walk naked. Roast changes: \
         {versions} versions, blame the guilty. GoT style: brutal, sexual shame."
    )
}

/// Spec agent
pub struct WalkAgent {
    context: AgentContext,
}

impl WalkAgent {
    /// Agent over the shared context
    pub fn new(context: AgentContext) -> Self {
        Self { context }
    }

    async fn versions(&self, subject: &str) -> Vec<DocVersion> {
        match self.context.records.versions(subject).await {
            Ok(versions) if !versions.is_empty() => versions,
            Ok(_) => samples::doc_versions(subject, Utc::now()),
            Err(err) => {
                warn!(error = %err, "version lookup failed, using sample history");
                samples::doc_versions(subject, Utc::now())
            }
        }
    }
}

#[async_trait]
impl ChaosAgent for WalkAgent {
    fn name(&self) -> &'static str {
        NAME
    }

    #[instrument(skip(self, input), fields(agent = NAME))]
    async fn execute(&self, input: &ChaosInput) -> Result<AgentResult, AgentError> {
        let source = input.input.trim();
        if source.is_empty() {
            return Ok(AgentResult {
                roast: EMPTY_ROAST.to_string(),
                truth: Truth::default(),
            });
        }

        if let Some(cached) = self.context.cached(CACHE_PREFIX, source) {
            return Ok(cached);
        }

        let versions = self.versions(source).await;
        let changes: Vec<String> = build_diffs(&versions).iter().map(Diff::line).collect();

        let user = if changes.is_empty() {
            source.to_string()
        } else {
            changes.join("\n")
        };
        let roast = self
            .context
            .roast(&system_prompt(changes.len()), &user)
            .await?;

        let receipts = versions
            .iter()
            .filter_map(|version| version.modified_at)
            .map(samples::receipt_stamp)
            .collect();

        let result = AgentResult {
            roast,
            truth: Truth {
                changes,
                receipts,
                ..Truth::default()
            },
        };
        self.context.store(CACHE_PREFIX, source, &result)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RecordSourceError;
    use crate::domain::ports::{NoRecordSource, RecordSource};
    use crate::services::agents::testing::{context, ScriptedClient};
    use std::sync::Arc;

    struct History(Vec<DocVersion>);

    #[async_trait]
    impl RecordSource for History {
        async fn versions(&self, _subject: &str) -> Result<Vec<DocVersion>, RecordSourceError> {
            Ok(self.0.clone())
        }
    }

    fn version(author: Option<&str>, delta: Option<SizeDelta>) -> DocVersion {
        DocVersion {
            id: None,
            modified_at: None,
            author: author.map(str::to_string),
            size_delta: delta,
        }
    }

    #[test]
    fn test_diffs_cover_last_three() {
        let versions = vec![
            version(Some("First"), None),
            version(Some("Legal"), Some(SizeDelta::Bytes(-120.0))),
            version(None, Some(SizeDelta::Bytes(2.5))),
            version(Some("Growth PM"), None),
        ];
        let lines: Vec<String> = build_diffs(&versions).iter().map(Diff::line).collect();
        assert_eq!(
            lines,
            vec![
                "Legal walked: -120 bytes of shame",
                "anonymous PM in Redmond walked: 2.5 bytes of shame",
                "Growth PM walked: ethics clause deleted",
            ]
        );
    }

    #[test]
    fn test_diffs_of_short_history() {
        assert!(build_diffs(&[]).is_empty());
        assert_eq!(build_diffs(&[version(None, None)]).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let client = ScriptedClient::new("burn");
        let (context, cache) = context(client.clone(), Arc::new(NoRecordSource));
        let agent = WalkAgent::new(context);

        let result = agent.execute(&ChaosInput::new("   ")).await.unwrap();

        assert!(result.roast.starts_with("The Septa sees no PRD"));
        assert!(result.truth.changes.is_empty());
        assert_eq!(client.calls(), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_sample_history_names_the_guilty() {
        let client = ScriptedClient::new("Legal walked naked deleting ethics.");
        let (context, _) = context(client.clone(), Arc::new(NoRecordSource));
        let agent = WalkAgent::new(context);

        let result = agent
            .execute(&ChaosInput::new("PRD ethics clause for review"))
            .await
            .unwrap();

        assert_eq!(
            result.truth.changes,
            vec![
                "VP of Engagement walked: VP swapped \"opt-in\" for \"pre-ticked box\"",
                "Random Director walked: Director inserted 4 review gates and 0 owners",
                "Security walked: Security added one sentence nobody read",
            ]
        );
        assert_eq!(result.truth.receipts.len(), 5);
        let request = client.last();
        assert!(request.messages[0].content.contains("Roast changes: 3 versions"));
        assert_eq!(request.messages[1].content, result.truth.changes.join("\n"));
    }

    #[tokio::test]
    async fn test_cached_by_trimmed_input() {
        let client = ScriptedClient::new("burn");
        let history = Arc::new(History(vec![version(Some("Legal"), None)]));
        let (context, _) = context(client.clone(), history);
        let agent = WalkAgent::new(context);

        agent.execute(&ChaosInput::new("spec v2")).await.unwrap();
        agent.execute(&ChaosInput::new("  spec v2  ")).await.unwrap();

        assert_eq!(client.calls(), 1);
    }
}
