use crate::services::inference::{OllamaGenerator, SqlGenerator};
use crate::{Result, WebError};
use sqlforge_config::SqlforgeConfig;
use sqlforge_dialect::{DialectTranslator, MysqlToSqlite};
use sqlforge_sandbox::Sandbox;
use std::sync::Arc;

/// Shared, immutable handler state
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn DialectTranslator>,
    pub sandbox: Arc<Sandbox>,
    pub generator: Arc<dyn SqlGenerator>,
    pub config: Arc<SqlforgeConfig>,
}

impl AppState {
    pub fn new(config: SqlforgeConfig, generator: Arc<dyn SqlGenerator>) -> Self {
        Self {
            translator: Arc::new(MysqlToSqlite),
            sandbox: Arc::new(Sandbox::new(config.sandbox.clone())),
            generator,
            config: Arc::new(config),
        }
    }

    /// State wired to the configured Ollama endpoint
    pub fn from_config(config: SqlforgeConfig) -> Result<Self> {
        let generator = OllamaGenerator::new(&config.inference)
            .map_err(|e| WebError::Config(e.to_string()))?;
        Ok(Self::new(config, Arc::new(generator)))
    }
}
