//! Shame CLI entry point.

use anyhow::Result;
use clap::Parser;

use shame::cli::{commands, Cli, Commands};
use shame::domain::models::Config;
use shame::infrastructure::config::ConfigLoader;
use shame::infrastructure::logging::{LogConfig, LoggerImpl};
use shame::services::DragonFireRequest;

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Dragonfire {
            target,
            mode,
            swarm_size,
        } => {
            let request = DragonFireRequest {
                target,
                mode,
                swarm_size,
            };
            commands::dragonfire::execute(request, &config, cli.json).await
        }
        Commands::Roast { input, kind, agent } => {
            commands::roast::execute(input, kind, agent, &config, cli.json).await
        }
        Commands::Serve { host, port } => commands::serve::execute(host, port, &config).await,
        Commands::Config => commands::config::execute(&config, cli.json),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        shame::cli::handle_error(err, json_mode);
    }
}
