use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careerpath-api"
    }))
}

/// GET /
/// Welcome message pointing at the guidance endpoint.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the AI Career Assistant API. \
            POST a resume to /api/v1/career-guidance to get started."
    }))
}
