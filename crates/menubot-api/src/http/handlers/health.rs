//! Liveness endpoints.

use axum::Json;
use serde_json::{Value, json};

/// GET / -- banner.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Menu API is running" }))
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
