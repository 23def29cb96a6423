//! # sqlforge configuration
//!
//! Typed configuration shared by the sqlforge crates. Every component
//! receives its section as an explicit value; nothing reads ambient state
//! after [`SqlforgeConfig::load`] returns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sqlforge_config::SqlforgeConfig;
//!
//! let config = SqlforgeConfig::load(None).expect("config");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod components;
mod error;
mod loader;

pub use components::{InferenceConfig, SandboxConfig, ServerConfig};
pub use error::{ConfigError, ConfigResult};
pub use loader::SqlforgeConfig;
