//! Session configuration loading.

use crate::cli::Cli;
use anyhow::Context;
use playout_tictactoe::SessionConfig;
use tracing::{debug, info};

/// Builds the session configuration from an optional TOML file with CLI
/// flags layered on top.
pub fn resolve(cli: &Cli) -> anyhow::Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "Loading session config");
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: SessionConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            info!(?config, "Config loaded");
            config
        }
        None => SessionConfig::new(),
    };

    if let Some(first_mover) = cli.first_mover {
        config = config.with_first_mover(first_mover.into());
    }
    if let Some(simulations) = cli.simulations {
        config = config.with_simulations(simulations);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}
