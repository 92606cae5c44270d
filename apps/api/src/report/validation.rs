//! Boundary validation: raw JSON body → `ReportRequest`.
//!
//! Runs once per request, before any generation logic. A required field is
//! missing when it is absent, `null`, `false`, `0`, or a blank string, which
//! matches how the browser form submits unset values.

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::report::metrics::EsgMetrics;
use crate::report::models::ReportRequest;

/// Required fields in the order they are reported back.
pub const REQUIRED_FIELDS: [&str; 4] = ["category", "companyName", "year", "tone"];

pub const MIN_YEAR: i64 = 2000;
pub const MAX_YEAR: i64 = 2100;

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Lists required fields that are missing from the body, in `REQUIRED_FIELDS` order.
pub fn missing_fields(body: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| is_missing(body.get(*field)))
        .collect()
}

fn parse_year(value: &Value) -> Option<i32> {
    let year = match value {
        Value::Number(n) => match n.as_i64() {
            Some(year) => year,
            None => {
                let year = n.as_f64()?;
                if year.fract() != 0.0 {
                    return None;
                }
                year as i64
            }
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        i32::try_from(year).ok()
    } else {
        None
    }
}

fn trimmed_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Validates a request body and builds the `ReportRequest` handed to generation.
///
/// Missing required fields win over malformed ones: a body with both only
/// reports what is missing, so the client fixes the form first.
pub fn parse_report_request(body: &Value) -> Result<ReportRequest, AppError> {
    let object = body
        .as_object()
        .ok_or_else(|| AppError::MalformedBody(format!("expected an object, got {body}")))?;

    let missing = missing_fields(object);
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let mut invalid = Vec::new();

    let category = trimmed_string(object.get("category"));
    if category.is_none() {
        invalid.push("category");
    }
    let company_name = trimmed_string(object.get("companyName"));
    if company_name.is_none() {
        invalid.push("companyName");
    }
    let year = object.get("year").and_then(parse_year);
    if year.is_none() {
        invalid.push("year");
    }
    let tone = trimmed_string(object.get("tone"));
    if tone.is_none() {
        invalid.push("tone");
    }

    let custom_prompt = match object.get("customPrompt") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            invalid.push("customPrompt");
            None
        }
    };

    let metrics = match object.get("metrics") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<EsgMetrics>(raw.clone()) {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                tracing::debug!("Rejecting metrics block: {e}");
                invalid.push("metrics");
                None
            }
        },
    };

    match (category, company_name, year, tone) {
        (Some(category), Some(company_name), Some(year), Some(tone)) if invalid.is_empty() => {
            let mut request = ReportRequest::new(category, company_name, year, tone);
            if let Some(prompt) = custom_prompt {
                request = request.with_custom_prompt(prompt);
            }
            if let Some(metrics) = metrics {
                request = request.with_metrics(metrics);
            }
            Ok(request)
        }
        _ => Err(AppError::InvalidFields(invalid)),
    }
}
