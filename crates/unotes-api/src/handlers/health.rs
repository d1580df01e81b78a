//! Liveness and readiness handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::AppState;

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "UNotes Backend API",
        "status": "running",
    }))
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Probe the model backend. `503` with status `degraded` when unreachable.
pub async fn inference_health(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state.tutor.backend().health_check().await.unwrap_or(false);
    let catalog = state.tutor.catalog();

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if healthy { "healthy" } else { "degraded" },
            "backend": state.tutor.backend().backend_name(),
            "vision_model": catalog.vision_model,
            "text_model": catalog.text_model,
        })),
    )
}
