mod config;
mod errors;
mod llm_client;
mod report;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::panic_response;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::report::generator::ReportGenerator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, never on a missing key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ESG report API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generation backend (absent key → sample mode)
    let generator = match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_api_base.clone(),
                config.generation_timeout,
            )?;
            info!(
                "Gemini client initialized (model: {}, timeout: {:?})",
                config.gemini_model, config.generation_timeout
            );
            let backend: Arc<dyn TextGenerator> = Arc::new(client);
            ReportGenerator::new(Some(backend), config.generation_timeout)
        }
        None => {
            warn!("GEMINI_API_KEY is not set; serving sample content only");
            ReportGenerator::sample_only()
        }
    };

    let state = AppState {
        generator: Arc::new(generator),
    };

    // Build router
    let app = build_router(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the report UI host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
