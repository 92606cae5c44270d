//! Report generation — orchestrates backend call and fallback.
//!
//! Flow: no backend → sample content;
//!       backend → build_prompt → single call under timeout → text,
//!       any backend failure → fallback content.
//!
//! CONTRACT: `generate` never fails. Backend errors are recovered here and
//! reported only through `ContentSource::Fallback`, so callers can tell
//! "recovered" from "model output" without inspecting logs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::llm_client::{LlmError, TextGenerator};
use crate::report::fallback::synthesize_content;
use crate::report::models::ReportRequest;
use crate::report::prompts::build_prompt;

/// Where the returned content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Text produced by the generation backend.
    Model,
    /// No backend configured; sample content by design.
    Sample,
    /// Backend failed; sample content substituted. `reason` is `LlmError::kind`.
    Fallback { reason: &'static str },
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Model => "model",
            ContentSource::Sample => "sample",
            ContentSource::Fallback { .. } => "fallback",
        }
    }

    pub fn fallback_reason(&self) -> Option<&'static str> {
        match self {
            ContentSource::Fallback { reason } => Some(*reason),
            _ => None,
        }
    }
}

/// Result of one generation: always usable content plus its provenance.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub content: String,
    pub source: ContentSource,
    pub elapsed: Duration,
}

/// Orchestrates report generation. Cheap to share behind an `Arc`.
pub struct ReportGenerator {
    backend: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl ReportGenerator {
    pub fn new(backend: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Generator with no backend: every request gets sample content.
    pub fn sample_only() -> Self {
        Self::new(None, Duration::from_secs(30))
    }

    pub fn sample_mode(&self) -> bool {
        self.backend.is_none()
    }

    pub async fn generate(&self, request: &ReportRequest) -> GenerationOutcome {
        let started = Instant::now();

        let Some(backend) = &self.backend else {
            info!(
                category = %request.category,
                "No generation backend configured; serving sample content"
            );
            return GenerationOutcome {
                content: synthesize_content(request),
                source: ContentSource::Sample,
                elapsed: started.elapsed(),
            };
        };

        let prompt = build_prompt(request);
        info!(
            model = backend.model(),
            category = %request.category,
            tone = %request.tone,
            prompt_chars = prompt.chars().count(),
            "Calling generation backend"
        );

        let result = match tokio::time::timeout(self.timeout, backend.generate(&prompt)).await {
            Ok(result) => result.and_then(reject_blank),
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        };

        match result {
            Ok(content) => {
                info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    content_chars = content.chars().count(),
                    "Generation backend succeeded"
                );
                GenerationOutcome {
                    content,
                    source: ContentSource::Model,
                    elapsed: started.elapsed(),
                }
            }
            Err(e) => {
                warn!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    kind = e.kind(),
                    hint = e.hint(),
                    "Generation backend failed, falling back to sample content: {e}"
                );
                GenerationOutcome {
                    content: synthesize_content(request),
                    source: ContentSource::Fallback { reason: e.kind() },
                    elapsed: started.elapsed(),
                }
            }
        }
    }
}

/// A 200 with nothing in it is treated like any other backend failure.
fn reject_blank(text: String) -> Result<String, LlmError> {
    if text.trim().is_empty() {
        Err(LlmError::EmptyContent)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stub backend: replays a fixed result and records prompts.
    struct StubBackend {
        reply: Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>,
        delay: Duration,
        prompts: Mutex<Vec<String>>,
    }

    impl StubBackend {
        fn replying(reply: impl Fn() -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
            Self {
                reply: Box::new(reply),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl TextGenerator for StubBackend {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.reply)()
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn waste_request() -> ReportRequest {
        ReportRequest::new("waste", "Acme", 2024, "formal")
    }

    fn generator_with(backend: Arc<StubBackend>) -> ReportGenerator {
        ReportGenerator::new(Some(backend), Duration::from_secs(30))
    }

    #[tokio::test]
    async fn test_sample_mode_returns_fallback_content() {
        let outcome = ReportGenerator::sample_only().generate(&waste_request()).await;
        assert_eq!(outcome.source, ContentSource::Sample);
        assert_eq!(outcome.content, synthesize_content(&waste_request()));
        assert!(outcome.content.contains("2026"));
    }

    #[tokio::test]
    async fn test_backend_text_is_returned_and_prompt_is_built() {
        let backend = Arc::new(StubBackend::replying(|| Ok("Generated section.".to_string())));
        let outcome = generator_with(backend.clone()).generate(&waste_request()).await;

        assert_eq!(outcome.source, ContentSource::Model);
        assert_eq!(outcome.content, "Generated section.");

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1, "exactly one attempt");
        assert_eq!(prompts[0], build_prompt(&waste_request()));
    }

    #[tokio::test]
    async fn test_error_status_falls_back() {
        for status in [400u16, 403, 429, 500] {
            let backend = Arc::new(StubBackend::replying(move || {
                Err(LlmError::Api {
                    status,
                    message: "nope".to_string(),
                })
            }));
            let outcome = generator_with(backend.clone()).generate(&waste_request()).await;

            assert!(matches!(outcome.source, ContentSource::Fallback { .. }));
            assert_eq!(outcome.content, synthesize_content(&waste_request()));
            assert_eq!(backend.prompts.lock().unwrap().len(), 1, "no retries");
        }
    }

    #[tokio::test]
    async fn test_rate_limit_reason_is_tagged() {
        let backend = Arc::new(StubBackend::replying(|| {
            Err(LlmError::Api {
                status: 429,
                message: "quota".to_string(),
            })
        }));
        let outcome = generator_with(backend).generate(&waste_request()).await;
        assert_eq!(
            outcome.source,
            ContentSource::Fallback {
                reason: "rate_limited"
            }
        );
    }

    #[tokio::test]
    async fn test_empty_success_falls_back() {
        let backend = Arc::new(StubBackend::replying(|| Ok("   \n".to_string())));
        let outcome = generator_with(backend).generate(&waste_request()).await;
        assert_eq!(
            outcome.source,
            ContentSource::Fallback {
                reason: "empty_response"
            }
        );
        assert!(!outcome.content.trim().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_backend_times_out_and_falls_back() {
        let backend = Arc::new(
            StubBackend::replying(|| Ok("too late".to_string()))
                .with_delay(Duration::from_secs(3600)),
        );
        let generator = ReportGenerator::new(Some(backend), Duration::from_secs(30));

        let outcome = generator.generate(&waste_request()).await;
        assert_eq!(outcome.source, ContentSource::Fallback { reason: "timeout" });
        assert!(outcome.content.contains("Acme"));
    }

    #[tokio::test]
    async fn test_unknown_category_never_yields_empty_content() {
        let backend = Arc::new(StubBackend::replying(|| Err(LlmError::EmptyContent)));
        let request = ReportRequest::new("unknown_code", "Acme", 2024, "mystery");
        let outcome = generator_with(backend).generate(&request).await;
        assert!(outcome.content.contains("Acme"));
        assert!(outcome.content.contains("2024"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_falls_back_with_network_reason() {
        use crate::llm_client::GeminiClient;
        use secrecy::Secret;

        // Nothing listens on port 1, so the connection is refused.
        let client = GeminiClient::new(
            Secret::new("test-key".to_string()),
            "gemini-1.5-flash",
            "http://127.0.0.1:1",
            Duration::from_secs(5),
        )
        .unwrap();
        let generator = ReportGenerator::new(Some(Arc::new(client)), Duration::from_secs(5));

        let outcome = generator.generate(&waste_request()).await;
        assert_eq!(outcome.source, ContentSource::Fallback { reason: "network" });
        assert!(!outcome.content.trim().is_empty());
        assert_eq!(outcome.content, synthesize_content(&waste_request()));
    }

    #[test]
    fn test_content_source_labels() {
        assert_eq!(ContentSource::Model.as_str(), "model");
        assert_eq!(ContentSource::Sample.fallback_reason(), None);
        assert_eq!(
            ContentSource::Fallback { reason: "timeout" }.fallback_reason(),
            Some("timeout")
        );
    }
}
