use crate::services::runner::translate_and_run;
use crate::services::state::AppState;
use crate::WebError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

pub fn sql_routes() -> Router<AppState> {
    Router::new().route("/api/execute-sql", post(execute_sql))
}

#[derive(Debug, Deserialize)]
struct ExecuteSqlRequest {
    #[serde(default)]
    sql: String,
    #[serde(default)]
    schema: String,
}

async fn execute_sql(
    State(state): State<AppState>,
    payload: Result<Json<ExecuteSqlRequest>, JsonRejection>,
) -> Result<Json<Value>, WebError> {
    let Json(req) = payload?;

    let sql = req.sql.trim();
    let schema = req.schema.trim();
    if sql.is_empty() {
        return Err(WebError::Validation("SQL query is required".to_string()));
    }
    if schema.is_empty() {
        return Err(WebError::Validation("Schema content is required".to_string()));
    }

    info!(schema_chars = schema.len(), query_chars = sql.len(), "Executing query");
    let outcome = translate_and_run(&state, schema.to_string(), sql.to_string()).await?;

    Ok(Json(json!({
        "success": true,
        "columns": outcome.columns(),
        "results": outcome.results_json(),
    })))
}
