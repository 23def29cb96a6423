use crate::services::inference::GenerateRequest;
use crate::services::state::AppState;
use crate::WebError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn generate_routes() -> Router<AppState> {
    Router::new().route("/api/generate-sql", post(generate_sql))
}

#[derive(Debug, Deserialize)]
struct GenerateSqlRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    schema: String,
    #[serde(default)]
    model: Option<String>,
}

async fn generate_sql(
    State(state): State<AppState>,
    payload: Result<Json<GenerateSqlRequest>, JsonRejection>,
) -> Result<Json<Value>, WebError> {
    let Json(req) = payload?;

    let query = req.query.trim();
    let schema = req.schema.trim();
    if query.is_empty() {
        return Err(WebError::Validation(
            "Natural language query is required".to_string(),
        ));
    }
    if schema.is_empty() {
        return Err(WebError::Validation("Schema content is required".to_string()));
    }

    let request = GenerateRequest {
        query: query.to_string(),
        schema: schema.to_string(),
        model: req.model,
    };
    let sql = state.generator.generate(&request).await?;

    Ok(Json(json!({
        "success": true,
        "sql": sql,
    })))
}
