use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "compliance-api"
    }))
}

/// GET /api/v1/inference/health
/// Single check of the inference service. Never retried.
pub async fn inference_health_handler(State(state): State<AppState>) -> Json<Value> {
    let available = state.inference.health().await;
    Json(json!({
        "available": available,
        "model": state.config.inference_model,
    }))
}
