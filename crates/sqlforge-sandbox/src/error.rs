//! Error types for sandbox execution

use thiserror::Error;

/// Sandbox error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SandboxError {
    /// The in-memory instance could not be opened or configured
    #[error("Connection error: {0}")]
    Connection(String),

    /// A schema statement could not be applied; the build was aborted
    #[error("Error executing schema: {reason}. Statement that failed: {statement}")]
    SchemaBuild {
        /// Truncated preview of the failing statement
        statement: String,
        /// Engine error text
        reason: String,
    },

    /// The user query failed against a successfully built instance
    #[error("{0}")]
    Query(String),

    /// Execution was stopped through its cancel token
    #[error("Execution interrupted")]
    Interrupted,
}

impl SandboxError {
    /// Whether the failure happened while building the schema
    pub fn is_schema_build(&self) -> bool {
        matches!(self, Self::SchemaBuild { .. })
    }
}

/// Result type for sandbox operations
pub type SandboxResult<T> = Result<T, SandboxError>;

pub(crate) fn query_error(err: rusqlite::Error) -> SandboxError {
    SandboxError::Query(err.to_string())
}
