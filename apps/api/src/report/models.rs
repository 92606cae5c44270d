//! Request and response types for report generation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::report::labels;
use crate::report::metrics::EsgMetrics;

/// ESG topic a report section covers.
///
/// Codes outside the known set are kept verbatim in `Other` and used as their
/// own label, so an unexpected value from the form degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Greenhouse,
    Energy,
    Waste,
    Water,
    Biodiversity,
    Other(String),
}

impl Category {
    pub fn code(&self) -> &str {
        match self {
            Category::Greenhouse => "greenhouse",
            Category::Energy => "energy",
            Category::Waste => "waste",
            Category::Water => "water",
            Category::Biodiversity => "biodiversity",
            Category::Other(code) => code,
        }
    }

    /// Human-readable label; the raw code for unknown categories.
    pub fn label(&self) -> &str {
        labels::category_label(self.code()).unwrap_or_else(|| self.code())
    }
}

impl From<String> for Category {
    fn from(code: String) -> Self {
        match code.as_str() {
            "greenhouse" => Category::Greenhouse,
            "energy" => Category::Energy,
            "waste" => Category::Waste,
            "water" => Category::Water,
            "biodiversity" => Category::Biodiversity,
            _ => Category::Other(code),
        }
    }
}

impl From<&str> for Category {
    fn from(code: &str) -> Self {
        Category::from(code.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.code().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Writing style requested for the section. Affects prose only, never facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    Formal,
    Concise,
    Analytical,
    Other(String),
}

impl Tone {
    pub fn code(&self) -> &str {
        match self {
            Tone::Formal => "formal",
            Tone::Concise => "concise",
            Tone::Analytical => "analytical",
            Tone::Other(code) => code,
        }
    }

    /// Writing instruction for the prompt; empty for unknown tones.
    pub fn instruction(&self) -> &'static str {
        labels::tone_instruction(self.code()).unwrap_or("")
    }

    /// Short adjective phrase used inside fallback prose.
    pub fn style_phrase(&self) -> &'static str {
        labels::tone_phrase(self.code()).unwrap_or(labels::NEUTRAL_TONE_PHRASE)
    }
}

impl From<String> for Tone {
    fn from(code: String) -> Self {
        match code.as_str() {
            "formal" => Tone::Formal,
            "concise" => Tone::Concise,
            "analytical" => Tone::Analytical,
            _ => Tone::Other(code),
        }
    }
}

impl From<&str> for Tone {
    fn from(code: &str) -> Self {
        Tone::from(code.to_string())
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.code().to_string()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validated report parameters. Only ever built by `validation::parse_report_request`
/// at the HTTP boundary, or directly in tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub category: Category,
    pub company_name: String,
    pub year: i32,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<EsgMetrics>,
}

impl ReportRequest {
    pub fn new(
        category: impl Into<Category>,
        company_name: impl Into<String>,
        year: i32,
        tone: impl Into<Tone>,
    ) -> Self {
        Self {
            category: category.into(),
            company_name: company_name.into(),
            year,
            tone: tone.into(),
            custom_prompt: None,
            metrics: None,
        }
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }

    pub fn with_metrics(mut self, metrics: EsgMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The extra instruction, if it carries any text.
    pub fn custom_instruction(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Observability data returned next to the content. Never semantically required.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub request_id: String,
    pub processed_at: String,
    /// Milliseconds spent handling the whole request.
    pub processing_time: u64,
    /// Milliseconds spent inside the orchestrator.
    pub ai_processing_time: u64,
    /// Length of `content` in characters.
    pub content_length: usize,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<&'static str>,
}

/// Response body for `POST /api/generate` and `POST /api/preview`.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReportMetadata>,
}
