use crate::routes::{generate_routes, health_routes, sql_routes};
use crate::services::state::AppState;
use crate::{Result, WebError};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlforge_config::SqlforgeConfig;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Assemble the application router from shared state.
///
/// The body limit applies before any handler runs, so oversized schemas are
/// refused with 413 without being translated.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = DefaultBodyLimit::max(server.max_body_bytes);
    let cors = cors_layer(&server.cors_origins);

    Router::new()
        .merge(sql_routes())
        .merge(generate_routes())
        .merge(health_routes())
        .with_state(state)
        .layer(body_limit)
        .layer(cors)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub async fn start_server(config: SqlforgeConfig) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .map_err(|e| WebError::Config(format!("Invalid address: {e}")))?;

    let state = AppState::from_config(config)?;
    let app = build_router(state);

    info!("Starting web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(WebError::Io)?;

    axum::serve(listener, app).await.map_err(WebError::Io)?;

    Ok(())
}
