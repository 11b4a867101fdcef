//! `shame config`

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::logging::mask_key;
use crate::infrastructure::openrouter::resolve_api_key;

/// Effective configuration as printed by `shame config`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigOutput(Config);

impl ConfigOutput {
    /// Effective configuration with the resolved key masked
    pub fn redacted(config: &Config, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = config.clone();
        config.completion.api_key =
            resolve_api_key(config.completion.api_key.as_deref(), lookup).map(|key| mask_key(&key));
        Self(config)
    }
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.0).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }
}

/// Print the effective configuration with the API key masked
///
/// # Errors
/// Never fails; the signature matches the other commands.
pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    output(
        &ConfigOutput::redacted(config, |name| std::env::var(name).ok()),
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_masked() {
        let out = ConfigOutput::redacted(&Config::default(), |name: &str| {
            (name == "OPENROUTER_API_KEY").then(|| "sk-or-v1-secretsecret1234".to_string())
        });
        let human = out.to_human();
        assert!(!human.contains("secretsecret"));
        assert!(human.contains("sk-o...1234"));
        assert_eq!(out.to_json()["completion"]["api_key"], "sk-o...1234");
    }

    #[test]
    fn test_missing_key_omitted() {
        let out = ConfigOutput::redacted(&Config::default(), |_: &str| None);
        assert!(out.to_json()["completion"].get("api_key").is_none());
        assert!(out.to_human().contains("swarm_model"));
    }
}
