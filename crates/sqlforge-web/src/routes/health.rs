//! Liveness and readiness

use crate::services::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use sqlforge_sandbox::SandboxResult;
use tracing::warn;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
}

async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "sqlforge-web",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the sandbox can open an instance
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    readiness_report(state.sandbox.engine_version())
}

fn readiness_report(engine: SandboxResult<String>) -> (StatusCode, Json<Value>) {
    match engine {
        Ok(version) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "sqlite_version": version })),
        ),
        Err(e) => {
            warn!(error = %e, "Sandbox unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": e.to_string() })),
            )
        }
    }
}
