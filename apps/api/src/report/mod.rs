// ESG report generation.
// Pure core: labels, metrics, prompts, fallback. Orchestration in generator;
// HTTP boundary in validation + handlers. Backend calls go through llm_client only.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod labels;
pub mod metrics;
pub mod models;
pub mod prompts;
pub mod validation;
