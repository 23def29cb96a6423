//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// Request bodies above this size are rejected before any handler runs
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
    /// Maximum accepted request body, in bytes
    pub max_body_bytes: usize,
    /// Upper bound on handling one request, translation and execution included
    pub request_timeout_secs: u64,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_secs: 30,
            cors_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for parsing into a socket address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
