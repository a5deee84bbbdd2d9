use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "outreach-api"
    }))
}

/// GET /api/v1/env
/// Reports which credentials are configured. Never echoes their values.
pub async fn env_status_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "GOOGLE_AI_API_KEY": state.config.has_model_credentials(),
    }))
}
