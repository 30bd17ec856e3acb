/// HTTP request handlers
use crate::domain::{Health, SubmissionPayload, SubmitResponse};
use crate::errors::ApiError;
use crate::services::NotifierService;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when a required secret is absent from the environment;
    /// submissions are then rejected with a configuration error.
    pub notifier: Option<Arc<NotifierService>>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Accept a capture event, relay it, and report per-target outcomes.
/// Individual dispatch failures are visible only inside `results`.
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmissionPayload>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let notifier = state.notifier.as_ref().ok_or(ApiError::MissingConfig)?;

    let results = notifier.handle(&payload).await;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Data sent to Telegram",
        results,
    }))
}

/// Cross-origin pre-flight: always 200 with no body, even when the
/// service is unconfigured.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Catch-all for unsupported methods on the submission route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
