use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Failures of the generation backend never reach this type: the orchestrator
/// recovers them into fallback content.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid fields: {}", .0.join(", "))]
    InvalidFields(Vec<&'static str>),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!("Missing required fields: {}", fields.join(", ")),
                    "missingFields": fields,
                }),
            ),
            AppError::InvalidFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!("Invalid field values: {}", fields.join(", ")),
                    "invalidFields": fields,
                }),
            ),
            AppError::MalformedBody(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Request body must be a JSON object: {msg}") }),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An error occurred while generating the report.",
                        "timestamp": chrono::Utc::now().to_rfc3339(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked. Wired through `CatchPanicLayer`, so a
/// defect in report code still produces the generic 500 body.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    AppError::Internal(anyhow::anyhow!("request handler panicked")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_fields_is_400_with_field_list() {
        let response = AppError::MissingFields(vec!["companyName", "tone"]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["missingFields"], json!(["companyName", "tone"]));
        assert!(body["error"].as_str().unwrap().contains("companyName"));
    }

    #[tokio::test]
    async fn test_internal_error_is_generic_500() {
        let response =
            AppError::Internal(anyhow::anyhow!("template table corrupted")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(!message.contains("template table"), "internals must not leak");
        assert!(body.get("missingFields").is_none());
    }

    #[tokio::test]
    async fn test_panic_response_matches_internal_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await["error"].as_str().is_some());
    }
}
