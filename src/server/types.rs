use crate::Error;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NOT_JSON_MESSAGE: &str = "Request must be JSON";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch response from DeepSeek API";

/// `/predict` accepts the bare data URI as a JSON string or an object wrapping it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PredictRequest {
    Encoded(String),
    Wrapped {
        #[serde(alias = "img", alias = "file")]
        image: String,
    },
}

impl PredictRequest {
    pub fn into_payload(self) -> String {
        match self {
            Self::Encoded(payload) | Self::Wrapped { image: payload } => payload,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub disease_context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    pub created_at: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub labels: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: None,
        }
    }

    pub fn typed(error: impl Into<String>, kind: &str) -> Self {
        Self {
            error: error.into(),
            kind: Some(kind.to_string()),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a pipeline failure onto the status and body clients see.
pub fn error_response(error: &Error) -> ApiError {
    match error {
        Error::Validation(message) => (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))),
        Error::Decode(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::typed(error.to_string(), error.kind())),
        ),
        Error::Upstream { status, .. } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(ErrorResponse::new(UPSTREAM_FAILURE_MESSAGE)),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::typed(error.to_string(), error.kind())),
        ),
    }
}
