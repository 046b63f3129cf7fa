use super::types::{
    ApiError, ChatRequest, ChatResponse, ErrorResponse, HealthResponse, NOT_JSON_MESSAGE,
    PredictRequest, error_response,
};
use crate::{
    Error,
    diagnosis::{Diagnosis, LABEL_COUNT},
    llm::{ChatClient, ChatPrompt},
    model::{self, Classifier},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Json},
};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Fallback when the upstream omits its model identifier.
pub const UNKNOWN_MODEL: &str = "unknown";

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub chat: Arc<dyn ChatClient>,
    pub static_dir: PathBuf,
}

fn reject_body(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    match rejection {
        JsonRejection::JsonDataError(e) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.body_text())))
        }
        JsonRejection::JsonSyntaxError(_) | JsonRejection::MissingJsonContentType(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(NOT_JSON_MESSAGE)),
        ),
        // Oversized bodies keep their 413
        other => (other.status(), Json(ErrorResponse::new(other.body_text()))),
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Index page not found")),
            ))
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        labels: LABEL_COUNT,
    })
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Diagnosis>, ApiError> {
    let Json(request) = payload.map_err(reject_body)?;
    let request_id = Uuid::new_v4();
    let encoded = request.into_payload();

    info!(
        "Received prediction request {} ({} bytes of payload)",
        request_id,
        encoded.len()
    );

    let classifier = Arc::clone(&state.classifier);
    let outcome = tokio::task::spawn_blocking(move || model::classify(classifier.as_ref(), &encoded))
        .await
        .map_err(|e| Error::internal(format!("Inference task failed: {}", e)))
        .and_then(|result| result);

    match outcome {
        Ok(diagnosis) => {
            info!(
                "Prediction {} classified as {} ({:.4})",
                request_id, diagnosis.result, diagnosis.probability
            );
            Ok(Json(diagnosis))
        }
        Err(e) => {
            error!("Prediction {} failed: {}", request_id, e);
            Err(error_response(&e))
        }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(reject_body)?;

    let prompt = ChatPrompt::new(&request.message, request.disease_context.as_deref())
        .map_err(|e| error_response(&e))?;

    info!(
        "Relaying chat message ({} chars, context: {:?})",
        prompt.message.len(),
        prompt.disease_context
    );

    match state.chat.complete(&prompt).await {
        Ok(completion) => Ok(Json(ChatResponse {
            response: completion.content,
            model: completion
                .model
                .unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            created_at: completion
                .created
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339().into()),
        })),
        Err(e) => {
            error!("Chat relay failed: {}", e);
            Err(error_response(&e))
        }
    }
}
