//! Axum route handlers for the Report API.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::report::fallback::synthesize_content;
use crate::report::labels::{CATEGORY_LABELS, TONE_LABELS};
use crate::report::models::{GeneratedReport, ReportMetadata};
use crate::report::validation::parse_report_request;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub categories: Vec<SelectOption>,
    pub tones: Vec<SelectOption>,
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

fn body_or_error(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))
}

/// POST /api/generate
///
/// Validates the body, then asks the orchestrator for content. Backend
/// failures never surface here: they come back as fallback content tagged in
/// `metadata.source`.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GeneratedReport>, AppError> {
    let started = Instant::now();
    let request_id = new_request_id();
    let span = info_span!("generate_report", request_id = %request_id);

    async move {
        let body = body_or_error(body)?;
        let request = parse_report_request(&body).map_err(|e| {
            info!("Rejected request: {e}");
            e
        })?;

        info!(
            company = %request.company_name,
            year = request.year,
            category = %request.category,
            tone = %request.tone,
            custom_prompt = request.custom_instruction().is_some(),
            metrics = request.metrics.is_some(),
            "Report request accepted"
        );

        let outcome = state.generator.generate(&request).await;
        let content_length = outcome.content.chars().count();
        let processing_time = started.elapsed().as_millis() as u64;

        info!(
            source = outcome.source.as_str(),
            processing_ms = processing_time,
            content_chars = content_length,
            "Report generated"
        );

        Ok::<_, AppError>(Json(GeneratedReport {
            metadata: Some(ReportMetadata {
                request_id: request_id.clone(),
                processed_at: chrono::Utc::now().to_rfc3339(),
                processing_time,
                ai_processing_time: outcome.elapsed.as_millis() as u64,
                content_length,
                source: outcome.source.as_str(),
                fallback_reason: outcome.source.fallback_reason(),
            }),
            content: outcome.content,
        }))
    }
    .instrument(span)
    .await
}

/// POST /api/preview
///
/// Same validation as generate, but always answers from the sample templates
/// without touching the generation backend.
pub async fn handle_preview(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GeneratedReport>, AppError> {
    let body = body_or_error(body)?;
    let request = parse_report_request(&body)?;

    Ok(Json(GeneratedReport {
        content: synthesize_content(&request),
        metadata: None,
    }))
}

/// GET /api/options
///
/// Category and tone choices for the form's dropdowns.
pub async fn handle_options() -> Json<OptionsResponse> {
    let to_options = |table: &'static [(&'static str, &'static str)]| -> Vec<SelectOption> {
        table
            .iter()
            .map(|&(value, label)| SelectOption { value, label })
            .collect()
    };

    Json(OptionsResponse {
        categories: to_options(CATEGORY_LABELS),
        tones: to_options(TONE_LABELS),
    })
}
