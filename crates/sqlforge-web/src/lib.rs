//! HTTP surface for sqlforge
//!
//! Exposes the translate-and-run pipeline and the SQL generation
//! collaborator as JSON endpoints.

pub mod routes;
pub mod server;
pub mod services;

mod error;

pub use error::{Result, WebError};
pub use server::{build_router, start_server};
pub use services::inference::{GenerateRequest, InferenceError, OllamaGenerator, SqlGenerator};
pub use services::state::AppState;
pub use sqlforge_config::{ServerConfig, SqlforgeConfig};
