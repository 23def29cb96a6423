//! Web error type and its HTTP mapping

use crate::services::inference::InferenceError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sqlforge_sandbox::SandboxError;
use thiserror::Error;
use tracing::{debug, error};

pub type Result<T> = std::result::Result<T, WebError>;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Payload(#[from] JsonRejection),

    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Query timed out after {0} seconds")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Payload(rejection) => rejection.status(),
            Self::Sandbox(SandboxError::Interrupted) => StatusCode::GATEWAY_TIMEOUT,
            Self::Sandbox(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Inference(err) => match err {
                InferenceError::ServiceUnreachable { .. } | InferenceError::MalformedResponse(_) => {
                    StatusCode::BAD_GATEWAY
                }
                InferenceError::ModelUnavailable(_) => StatusCode::NOT_FOUND,
                InferenceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) | Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(WebError::Validation("SQL query is required".into()), StatusCode::BAD_REQUEST ; "validation")]
    #[test_case(WebError::Sandbox(SandboxError::Query("no such table: t".into())), StatusCode::UNPROCESSABLE_ENTITY ; "query")]
    #[test_case(
        WebError::Sandbox(SandboxError::SchemaBuild { statement: "CREAT".into(), reason: "syntax error".into() }),
        StatusCode::UNPROCESSABLE_ENTITY ;
        "schema build"
    )]
    #[test_case(
        WebError::Inference(InferenceError::ServiceUnreachable { endpoint: "http://x".into(), reason: "refused".into() }),
        StatusCode::BAD_GATEWAY ;
        "unreachable"
    )]
    #[test_case(WebError::Inference(InferenceError::ModelUnavailable("m".into())), StatusCode::NOT_FOUND ; "model")]
    #[test_case(WebError::Inference(InferenceError::MalformedResponse("{}".into())), StatusCode::BAD_GATEWAY ; "malformed")]
    #[test_case(WebError::Inference(InferenceError::Other("boom".into())), StatusCode::INTERNAL_SERVER_ERROR ; "inference other")]
    #[test_case(WebError::Sandbox(SandboxError::Interrupted), StatusCode::GATEWAY_TIMEOUT ; "interrupted")]
    #[test_case(WebError::Timeout(30), StatusCode::GATEWAY_TIMEOUT ; "timeout")]
    #[test_case(WebError::Internal("join".into()), StatusCode::INTERNAL_SERVER_ERROR ; "internal")]
    fn test_status_code(err: WebError, expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[test]
    fn test_sandbox_message_passes_through() {
        let err = WebError::from(SandboxError::SchemaBuild {
            statement: "CREAT TABLE".into(),
            reason: "near \"CREAT\": syntax error".into(),
        });
        assert_eq!(
            err.to_string(),
            "Error executing schema: near \"CREAT\": syntax error. Statement that failed: CREAT TABLE"
        );
    }
}
