use anyhow::{Context, Result};
use sqlforge_config::SqlforgeConfig;

pub fn execute(config: &SqlforgeConfig) -> Result<()> {
    let rendered = config
        .to_toml_string()
        .context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
