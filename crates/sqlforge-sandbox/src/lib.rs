//! Ephemeral SQLite sandbox
//!
//! Builds a fresh in-memory database from a canonical schema script, runs
//! exactly one query against it and shapes the outcome for JSON.
//!
//! ## Features
//!
//! - **Isolation**: every call opens its own `:memory:` connection and drops it
//!   before returning; `ATTACH` is disabled so nothing reaches the filesystem
//! - **Tolerant builds**: statements failing with "already exists" are skipped
//! - **Cancellable**: a [`CancelToken`] interrupts a running statement from
//!   another thread
//! - **Ordered results**: column order and row order exactly as the engine
//!   produced them
//!
//! ## Usage
//!
//! ```rust
//! use sqlforge_sandbox::{QueryOutcome, Sandbox, SandboxConfig};
//!
//! let sandbox = Sandbox::new(SandboxConfig::default());
//! let outcome = sandbox
//!     .execute("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)", "SELECT * FROM t")
//!     .unwrap();
//! assert_eq!(outcome.columns(), ["id", "name"]);
//! ```

pub mod cancel;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod sandbox;

// Re-exports
pub use cancel::CancelToken;
pub use error::{SandboxError, SandboxResult};
pub use outcome::{QueryOutcome, Row};
pub use sandbox::Sandbox;
pub use sqlforge_config::SandboxConfig;
