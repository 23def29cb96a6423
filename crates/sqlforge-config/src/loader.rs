//! Configuration loading
//!
//! Precedence, lowest to highest: built-in defaults, the TOML config file,
//! environment variables. CLI flags are applied by the binary on top.

use crate::components::{InferenceConfig, SandboxConfig, ServerConfig};
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Skips the user config file when set (used by tests)
const TEST_MODE_VAR: &str = "SQLFORGE_TEST_MODE";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlforgeConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Ephemeral database settings
    pub sandbox: SandboxConfig,
    /// Natural-language-to-SQL collaborator settings
    pub inference: InferenceConfig,
}

impl SqlforgeConfig {
    /// Load configuration from `config_file` (or the default location),
    /// apply environment overrides and validate the result.
    pub fn load(config_file: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::from_file_or_default(config_file)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.config/sqlforge/config.toml` on Linux, the platform equivalent elsewhere
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sqlforge").join("config.toml"))
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn from_file_or_default(config_file: Option<PathBuf>) -> ConfigResult<Self> {
        if config_file.is_none() && std::env::var(TEST_MODE_VAR).is_ok() {
            return Ok(Self::default());
        }

        // An explicit path must exist; the default location is optional
        let path = match config_file {
            Some(path) => Some(path),
            None => Self::default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration file");
                Self::from_file(&path)
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SQLFORGE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SQLFORGE_PORT") {
            self.server.port = parse_var("SQLFORGE_PORT", &port)?;
        }
        if let Some(limit) = lookup("SQLFORGE_MAX_BODY_BYTES") {
            self.server.max_body_bytes = parse_var("SQLFORGE_MAX_BODY_BYTES", &limit)?;
        }
        if let Some(timeout) = lookup("SQLFORGE_REQUEST_TIMEOUT") {
            self.server.request_timeout_secs = parse_var("SQLFORGE_REQUEST_TIMEOUT", &timeout)?;
        }

        // Same names the Ollama tooling uses
        if let Some(url) = lookup("OLLAMA_API_URL") {
            self.inference.endpoint = url;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.inference.model = model;
        }

        Ok(())
    }

    /// Reject values no component can work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be non-zero".into(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_secs must be non-zero".into(),
            ));
        }
        if self.sandbox.statement_preview_len == 0 {
            return Err(ConfigError::Invalid(
                "sandbox.statement_preview_len must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name}={value:?} is not a valid value")))
}
