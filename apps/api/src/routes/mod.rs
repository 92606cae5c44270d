pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::report::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Report API
        .route("/api/generate", post(handlers::handle_generate))
        .route("/api/preview", post(handlers::handle_preview))
        .route("/api/options", get(handlers::handle_options))
        .with_state(state)
}
