//! Inference service configuration
//!
//! Points the natural-language-to-SQL collaborator at a local Ollama server.

use serde::{Deserialize, Serialize};

/// Inference collaborator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Chat endpoint, e.g. `http://localhost:11434/api/chat`
    pub endpoint: String,
    /// Model used when a request does not name one
    pub model: String,
    /// Timeout for a single generation call
    pub timeout_secs: u64,
    /// Schema text beyond this many characters is cut from the prompt
    pub max_schema_chars: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/chat".to_string(),
            model: "llama3.2:3b".to_string(),
            timeout_secs: 300,
            max_schema_chars: 2000,
        }
    }
}
