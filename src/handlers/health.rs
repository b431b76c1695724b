use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::service::CarService;

pub fn router() -> Router<CarService> {
    Router::new().route("/health", get(health_check))
}

/// Liveness only; the store is not contacted.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
