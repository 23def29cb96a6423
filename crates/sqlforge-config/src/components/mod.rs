//! Component configuration sections
//!
//! Each section deserializes on its own with defaults for missing keys, so a
//! config file only needs the values it changes.

mod inference;
mod sandbox;
mod server;

pub use inference::InferenceConfig;
pub use sandbox::SandboxConfig;
pub use server::ServerConfig;
