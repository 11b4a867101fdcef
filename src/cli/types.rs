//! CLI type definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::ChaosKind;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "shame")]
#[command(about = "Shame - chaos roasting with a DragonFire swarm", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .shame/
    #[arg(short, long, global = true, env = "SHAME_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fan a roast out across the swarm and crown a winner
    Dragonfire {
        /// Who to roast (default: Microsoft)
        #[arg(short, long)]
        target: Option<String>,

        /// Roast mode (default: roast)
        #[arg(short, long)]
        mode: Option<String>,

        /// Number of swarm members; non-positive values use the configured default
        #[arg(short, long, allow_negative_numbers = true)]
        swarm_size: Option<f64>,
    },

    /// Roast a piece of chaos through Longclaw or a single agent
    Roast {
        /// Chaos text (deck name, PRD title, ticket id)
        input: String,

        /// Force the chaos category instead of keyword detection
        #[arg(short, long)]
        kind: Option<ChaosKind>,

        /// Run one agent directly: valyria, walk or bell
        #[arg(short, long, conflicts_with = "kind")]
        agent: Option<String>,
    },

    /// Start the HTTP API
    Serve {
        /// Host to bind (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the effective configuration
    Config,
}
