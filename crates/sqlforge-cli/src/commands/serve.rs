use anyhow::{Context, Result};
use sqlforge_config::SqlforgeConfig;
use tracing::info;

pub async fn execute(mut config: SqlforgeConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().context("Invalid server configuration")?;

    info!(
        model = %config.inference.model,
        endpoint = %config.inference.endpoint,
        "Inference service configured"
    );

    sqlforge_web::start_server(config)
        .await
        .context("Web server failed")
}
