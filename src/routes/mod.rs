/// Application routes configuration
use crate::handlers::{health, method_not_allowed, preflight, submit, AppState};
use axum::http::{header, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health check
        .route("/health", get(health))
        // Submission endpoint
        .route(
            "/api/send-telegram",
            post(submit).options(preflight).fallback(method_not_allowed),
        )
        .layer(cors)
        .with_state(state)
}
