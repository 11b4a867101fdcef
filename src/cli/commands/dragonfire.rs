//! `shame dragonfire`

use anyhow::Result;
use serde::Serialize;

use crate::application::ShameServices;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{DragonFireReport, DragonFireRequest};

/// DragonFire report printed as markdown or JSON
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DragonFireOutput(DragonFireReport);

impl CommandOutput for DragonFireOutput {
    fn to_human(&self) -> String {
        self.0.to_markdown()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }
}

/// Run one DragonFire swarm and print the report
///
/// # Errors
/// Fails without an API key or when no swarm member survives.
pub async fn execute(request: DragonFireRequest, config: &Config, json_mode: bool) -> Result<()> {
    let services = ShameServices::from_config(config)?;
    let report = services.dragonfire.ignite(&request).await?;
    output(&DragonFireOutput(report), json_mode);
    Ok(())
}
