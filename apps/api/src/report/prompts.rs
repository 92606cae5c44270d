// Prompt construction for report generation.
// Pure string building: no I/O, same input always yields the same prompt.

use crate::report::models::ReportRequest;

/// The three parts every generated section is asked to cover.
pub const SECTION_STRUCTURE: &str = "Structure the section as follows:
1. The company's approach to this ESG area
2. Key performance results and metrics
3. Future targets and plans

Write 2-3 specific, professional paragraphs for each part.";

/// Heading of the optional block carrying the user's own instruction.
pub const CUSTOM_PROMPT_HEADING: &str = "Additional requirements:";

/// Heading of the optional block carrying form metrics.
pub const METRICS_HEADING: &str = "Reported metrics (use these figures where relevant):";

/// Builds the instruction sent to the generation backend.
///
/// Unknown categories fall back to their raw code as the label; unknown tones
/// contribute no style instruction. Metrics and the custom instruction are
/// appended only when they carry content, so an absent value leaves no
/// heading behind.
pub fn build_prompt(request: &ReportRequest) -> String {
    let mut prompt = format!(
        "Write the {label} section of {company}'s {year} ESG report.",
        label = request.category.label(),
        company = request.company_name,
        year = request.year,
    );

    let tone_instruction = request.tone.instruction();
    if !tone_instruction.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(tone_instruction);
    }

    prompt.push_str("\n\n");
    prompt.push_str(SECTION_STRUCTURE);

    if let Some(metrics) = &request.metrics {
        let lines = metrics.metric_lines();
        if !lines.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(METRICS_HEADING);
            for line in lines {
                prompt.push_str("\n- ");
                prompt.push_str(&line);
            }
        }
    }

    if let Some(custom) = request.custom_instruction() {
        prompt.push_str("\n\n");
        prompt.push_str(CUSTOM_PROMPT_HEADING);
        prompt.push('\n');
        prompt.push_str(custom);
    }

    prompt
}
