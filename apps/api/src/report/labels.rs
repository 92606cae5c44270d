//! Static label and tone tables shared by the prompt builder, the fallback
//! generator and the options endpoint. Read-only; safe to share across requests.

/// Category codes and their display labels, in form order.
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("greenhouse", "Greenhouse Gas Emissions"),
    ("energy", "Energy Consumption"),
    ("waste", "Waste Management"),
    ("water", "Water Usage"),
    ("biodiversity", "Biodiversity"),
];

/// Tone codes and their display labels, in form order.
pub const TONE_LABELS: &[(&str, &str)] = &[
    ("formal", "Formal"),
    ("concise", "Concise"),
    ("analytical", "Analytical"),
];

const TONE_INSTRUCTIONS: &[(&str, &str)] = &[
    (
        "formal",
        "Write in a formal, professional tone. Use industry terminology where appropriate \
         and keep the narrative centred on objective facts.",
    ),
    (
        "concise",
        "Write in a concise, clear tone. Include only the essential points and leave out \
         unnecessary explanation.",
    ),
    (
        "analytical",
        "Write in an analytical, data-driven tone. Build a logical narrative around figures \
         and statistics.",
    ),
];

const TONE_PHRASES: &[(&str, &str)] = &[
    ("formal", "formal and professional"),
    ("concise", "concise and clear"),
    ("analytical", "analytical and data-driven"),
];

/// Used in fallback prose when the tone code is unknown.
pub const NEUTRAL_TONE_PHRASE: &str = "balanced";

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, value)| *value)
}

pub fn category_label(code: &str) -> Option<&'static str> {
    lookup(CATEGORY_LABELS, code)
}

pub fn tone_instruction(code: &str) -> Option<&'static str> {
    lookup(TONE_INSTRUCTIONS, code)
}

pub fn tone_phrase(code: &str) -> Option<&'static str> {
    lookup(TONE_PHRASES, code)
}
