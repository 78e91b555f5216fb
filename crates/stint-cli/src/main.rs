use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stint_cli::commands;
use stint_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never interleave with the rendered tracker.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config_path = cli.config.as_deref();
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Run { task }) => commands::run::run(&config, task.as_deref())?,
        Some(Commands::Config) => {
            let mut stdout = std::io::stdout().lock();
            commands::config::run(&mut stdout, &config, config_path)?;
        }
        None => commands::run::run(&config, None)?,
    }

    Ok(())
}
