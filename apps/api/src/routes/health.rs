use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe. Never touches the model.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "ai-resume-matcher",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
