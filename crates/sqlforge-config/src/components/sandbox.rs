//! Sandbox executor configuration

use serde::{Deserialize, Serialize};

/// Settings applied to every ephemeral database instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Enforce foreign key constraints (`PRAGMA foreign_keys = ON`)
    pub foreign_keys: bool,
    /// Characters of a failing schema statement echoed back in build errors
    pub statement_preview_len: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            foreign_keys: false,
            statement_preview_len: 100,
        }
    }
}
