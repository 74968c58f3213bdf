// handlers/public/health.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub const LIVENESS_MESSAGE: &str = "Toy Corner Server";

/// GET / - plain-text liveness probe
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health - liveness plus a storage ping
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "environment": state.config.environment,
                "database": "connected",
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "timestamp": now,
                    "environment": state.config.environment,
                    "database": "unreachable",
                })),
            )
        }
    }
}
