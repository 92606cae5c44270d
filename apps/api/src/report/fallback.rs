//! Sample content used whenever the generation backend is unavailable.
//!
//! Hand-written two-paragraph narratives per category, filled with the company
//! name, the year and a tone phrase. Some templates look ahead from the report
//! year (waste: year + 2, biodiversity: year + 3). Deterministic and total:
//! every input, including unknown categories and tones, yields non-empty text.

use crate::report::models::{Category, ReportRequest};

pub fn synthesize_content(request: &ReportRequest) -> String {
    let company = request.company_name.as_str();
    let year = request.year;
    let tone = with_article(request.tone.style_phrase());

    match &request.category {
        Category::Greenhouse => format!(
            "{company} took {tone} approach to managing greenhouse gas emissions in {year}. \
On its path to carbon neutrality, the company measures and manages both direct emissions (Scope 1) \
and indirect emissions from purchased energy (Scope 2). Greenhouse gas emissions fell 12% year over year, \
the result of a larger share of renewable energy and a series of energy-efficiency projects.

In line with the Science Based Targets initiative (SBTi), the company aims to cut emissions 50% \
against its 2018 baseline by 2030. To get there it will expand investment in renewable energy \
and keep rolling out energy-efficiency projects across its operations."
        ),
        Category::Energy => format!(
            "{company}'s {year} energy consumption report presents {tone} account of its progress. \
The company now sources 35% of its total energy consumption from renewable sources, \
and facility upgrades aimed at energy efficiency cut overall energy use by 8% compared with the previous year.

Over the next five years the company plans to improve energy efficiency by a further 15% \
and raise the renewable share to 60%. This will be driven by investment in on-site solar generation \
and a more advanced energy management system."
        ),
        Category::Waste => format!(
            "{company} implemented {tone} waste management strategy in {year}. \
Landfilled waste fell by 25% and the recycling rate rose to 65%. \
Through its zero-waste initiative the company promotes the reuse and upcycling of waste \
generated in its production processes.

The company targets zero waste to landfill by {target_year}. To achieve this it will apply \
circular-economy principles to product design and expand waste reduction programs \
across its supply chain.",
            target_year = year + 2,
        ),
        Category::Water => format!(
            "{company}'s water management in {year} reflects {tone} approach. \
Water consumption fell 15% year over year, and a newly installed wastewater recycling system \
now allows 40% of process water to be reused. The company also takes part in regional \
water conservation projects alongside local communities.

Going forward, the company will cut water use at sites in water-stressed regions by a further 30% \
and install wastewater recycling at every production facility to reach a 70% water reuse rate."
        ),
        Category::Biodiversity => format!(
            "{company} ran {tone} biodiversity conservation program in {year}. \
Habitat restoration projects around its sites support local ecosystems, and biodiversity impact \
assessments across the supply chain guide measures that minimise negative effects.

By {target_year} the company aims for a net gain in biodiversity within 5 km of every site, \
supported by growing investment in nature-based solutions and ecosystem restoration projects.",
            target_year = year + 3,
        ),
        Category::Other(code) => format!(
            "This is the {label} section of {company}'s {year} ESG report. \
Content written in {tone} style will appear here.",
            label = if code.trim().is_empty() { "general" } else { code.as_str() },
        ),
    }
}

/// Prefixes the phrase with the matching indefinite article.
fn with_article(phrase: &str) -> String {
    let article = match phrase.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    };
    format!("{article} {phrase}")
}
