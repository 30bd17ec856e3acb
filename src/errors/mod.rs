/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required secret (bot token or primary chat id) is not configured.
    #[error("Server configuration missing")]
    MissingConfig,
    /// The submission endpoint was hit with anything but POST or OPTIONS.
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("External API error: {0}")]
    ExternalApi(#[from] reqwest::Error),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // 405 carries a bare error body, no success flag.
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(serde_json::json!({ "error": self.to_string() })),
            )
                .into_response(),
            // Everything else is a server-side failure of the whole request.
            _ => {
                tracing::error!("request failed: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "success": false,
                        "error": self.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_allowed_maps_to_405() {
        let resp = ApiError::MethodNotAllowed.into_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn missing_config_maps_to_500() {
        let resp = ApiError::MissingConfig.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_config_message_is_generic() {
        assert_eq!(
            ApiError::MissingConfig.to_string(),
            "Server configuration missing"
        );
    }
}
