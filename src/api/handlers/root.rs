use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Atrium API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Internal company portal: announcements, events, documents and help desk",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "auth": "/auth/login",
            "announcements": "/announcements",
            "events": "/events",
            "admin": "/admin"
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let integrations = state.service_context.integration_manager.registered().await;

    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "integrations": integrations,
    })))
}
