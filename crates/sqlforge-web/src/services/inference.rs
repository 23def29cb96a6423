//! SQL generation collaborator
//!
//! The web layer only sees [`SqlGenerator`]; [`OllamaGenerator`] is the one
//! client shipped, talking to a local Ollama server.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use sqlforge_config::InferenceConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```(?:sql)?\n?").unwrap());

const SYSTEM_PROMPT: &str =
    "You are an expert SQL query generator. Generate only SQL queries without explanations.";

const CHAT_MAX_TOKENS: u32 = 500;
const GENERATE_MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.1;
const ERROR_DETAIL_CHARS: usize = 200;

/// Inference failure kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("Cannot connect to the inference service at {endpoint}: {reason}")]
    ServiceUnreachable { endpoint: String, reason: String },

    #[error("Model not found: {0}")]
    ModelUnavailable(String),

    #[error("No SQL generated from API response: {0}")]
    MalformedResponse(String),

    #[error("Error generating SQL: {0}")]
    Other(String),
}

/// Natural-language request for a query over a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub query: String,
    pub schema: String,
    /// Overrides the configured model when set and non-blank
    pub model: Option<String>,
}

/// Turns a natural-language request into SQL text
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError>;
}

/// Ollama client: `/api/chat` first, `/api/generate` for older servers
pub struct OllamaGenerator {
    client: reqwest::Client,
    chat_url: String,
    generate_url: String,
    default_model: String,
    max_schema_chars: usize,
}

impl OllamaGenerator {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            chat_url: config.endpoint.clone(),
            generate_url: config.endpoint.replace("/api/chat", "/api/generate"),
            default_model: config.model.clone(),
            max_schema_chars: config.max_schema_chars,
        })
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Response, InferenceError> {
        self.client.post(url).json(body).send().await.map_err(|e| {
            if e.is_connect() {
                InferenceError::ServiceUnreachable {
                    endpoint: url.to_string(),
                    reason: e.to_string(),
                }
            } else {
                InferenceError::Other(format!("API request failed: {e}"))
            }
        })
    }
}

#[async_trait]
impl SqlGenerator for OllamaGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        let model = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str());
        let prompt = build_prompt(&request.query, &request.schema, self.max_schema_chars);

        let chat_body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "stream": false,
            "options": { "temperature": TEMPERATURE, "num_predict": CHAT_MAX_TOKENS },
        });

        let mut response = self.post(&self.chat_url, &chat_body).await?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::INTERNAL_SERVER_ERROR
        ) {
            debug!(status = %response.status(), url = %self.generate_url, "Chat endpoint failed, trying generate");
            let generate_body = json!({
                "model": model,
                "prompt": format!("{SYSTEM_PROMPT}\n\n{prompt}"),
                "stream": false,
                "options": { "temperature": TEMPERATURE, "num_predict": GENERATE_MAX_TOKENS },
            });
            response = self.post(&self.generate_url, &generate_body).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;
        let content = extract_content(&data)
            .ok_or_else(|| InferenceError::MalformedResponse(truncate(&data.to_string())))?;

        let sql = strip_code_fences(content);
        info!(model, chars = sql.len(), "Generated SQL");
        Ok(sql)
    }
}

/// Prompt with the schema cut to `max_schema_chars` characters.
pub fn build_prompt(query: &str, schema: &str, max_schema_chars: usize) -> String {
    let schema = if schema.chars().count() > max_schema_chars {
        let head: String = schema.chars().take(max_schema_chars).collect();
        format!("{head}\n... (schema truncated)")
    } else {
        schema.to_string()
    };

    format!("Schema:\n{schema}\n\nQuery: {query}\n\nSQL:")
}

/// Chat responses carry `message.content`; generate responses carry `response`.
fn extract_content(data: &Value) -> Option<&str> {
    data.pointer("/message/content")
        .and_then(Value::as_str)
        .or_else(|| data.get("response").and_then(Value::as_str))
}

/// Remove Markdown code fences around generated SQL.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_RE.replace_all(text.trim(), "").trim().to_string()
}

fn classify_failure(status: StatusCode, body: &str) -> InferenceError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from));

    match message {
        Some(msg) if status == StatusCode::NOT_FOUND || msg.to_lowercase().contains("not found") => {
            InferenceError::ModelUnavailable(msg)
        }
        Some(msg) => InferenceError::Other(format!("Ollama API returned status {status}: {msg}")),
        None => InferenceError::Other(format!(
            "Ollama API returned status {status}: {}",
            truncate(body)
        )),
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(ERROR_DETAIL_CHARS).collect()
}
