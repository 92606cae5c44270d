use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Returns a simple status object with service version and generation mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "ESG report API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": if state.generator.sample_mode() { "sample" } else { "model" },
    }))
}
