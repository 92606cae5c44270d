use std::sync::Arc;

use crate::report::generator::ReportGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator; holds the Gemini client when `GEMINI_API_KEY` is set.
    pub generator: Arc<ReportGenerator>,
}
