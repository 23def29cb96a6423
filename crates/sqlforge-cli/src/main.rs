use anyhow::{Context, Result};
use clap::Parser;
use sqlforge_cli::cli::{Cli, Commands};
use sqlforge_cli::{commands, logging};
use sqlforge_config::SqlforgeConfig;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.effective_log_level().into());

    let config = SqlforgeConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => commands::serve::execute(config, host, port).await?,
        Commands::Translate { schema_file } => commands::translate::execute(&schema_file)?,
        Commands::Run {
            schema_file,
            query,
            no_translate,
        } => commands::run::execute(config, &schema_file, &query, no_translate)?,
        Commands::Config => commands::config::execute(&config)?,
    }

    Ok(())
}
