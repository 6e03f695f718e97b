use axum::Json;
use serde_json::{json, Value};

use crate::llm_client::MODEL;

/// GET /api/health
/// Returns a simple status object with service version and the model in use.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careerlens-api",
        "model": MODEL
    }))
}
