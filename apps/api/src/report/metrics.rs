//! ESG metrics from the input form and the indicators derived from them.
//!
//! Every figure is optional. HTML number inputs submit strings, so numeric
//! fields accept either JSON numbers or numeric strings; blank strings count
//! as absent.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Previous/current/target triple for one emissions scope, in tCO2e.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionFigures {
    #[serde(default, deserialize_with = "lenient_number")]
    pub previous_year: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_year: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub target: Option<f64>,
}

/// Energy use in MWh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyFigures {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_usage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub renewable_usage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub renewable_target: Option<f64>,
}

/// Waste in tonnes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteFigures {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_waste: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub recycled_waste: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub recycling_target: Option<f64>,
}

/// Water withdrawal in cubic metres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterFigures {
    #[serde(default, deserialize_with = "lenient_number")]
    pub previous_year: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_year: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub reduction_target: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoTech {
    pub name: Option<String>,
    pub implementation_date: Option<String>,
    pub expected_impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgMetrics {
    pub scope1_emissions: Option<EmissionFigures>,
    pub scope2_emissions: Option<EmissionFigures>,
    pub scope3_emissions: Option<EmissionFigures>,
    pub energy_usage: Option<EnergyFigures>,
    pub waste_management: Option<WasteFigures>,
    pub water_usage: Option<WaterFigures>,
    pub eco_friendly_tech: Option<EcoTech>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(de::Error::custom(format!("'{s}' is not a number"))),
        },
        Some(other) => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Derived indicators
// ────────────────────────────────────────────────────────────────────────────

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Year-over-year reduction in percent. 0 when either value is missing or zero.
pub fn reduction_pct(current: Option<f64>, previous: Option<f64>) -> f64 {
    match (usable(current), usable(previous)) {
        (Some(current), Some(previous)) => (previous - current) / previous * 100.0,
        _ => 0.0,
    }
}

/// Progress toward a target in percent. 0 when either value is missing or zero.
pub fn achievement_pct(current: Option<f64>, target: Option<f64>) -> f64 {
    match (usable(current), usable(target)) {
        (Some(current), Some(target)) => current / target * 100.0,
        _ => 0.0,
    }
}

/// `part` as a percentage of `total`; `None` without a usable total.
pub fn share_pct(part: Option<f64>, total: Option<f64>) -> Option<f64> {
    let total = usable(total)?;
    Some(part.unwrap_or(0.0) / total * 100.0)
}

impl EsgMetrics {
    /// Mean of the six target-achievement figures (three scopes, energy,
    /// waste, water). Missing groups count as 0. `None` when none of the six
    /// groups was supplied.
    pub fn overall_achievement(&self) -> Option<f64> {
        let groups_present = [
            self.scope1_emissions.is_some(),
            self.scope2_emissions.is_some(),
            self.scope3_emissions.is_some(),
            self.energy_usage.is_some(),
            self.waste_management.is_some(),
            self.water_usage.is_some(),
        ];
        if !groups_present.iter().any(|present| *present) {
            return None;
        }

        let scope = |e: &Option<EmissionFigures>| {
            e.as_ref()
                .map(|e| achievement_pct(e.current_year, e.target))
                .unwrap_or(0.0)
        };
        let values = [
            scope(&self.scope1_emissions),
            scope(&self.scope2_emissions),
            scope(&self.scope3_emissions),
            self.energy_usage
                .as_ref()
                .map(|e| achievement_pct(e.renewable_usage, e.renewable_target))
                .unwrap_or(0.0),
            self.waste_management
                .as_ref()
                .map(|w| achievement_pct(w.recycled_waste, w.recycling_target))
                .unwrap_or(0.0),
            self.water_usage
                .as_ref()
                .map(|w| achievement_pct(w.current_year, w.reduction_target))
                .unwrap_or(0.0),
        ];

        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Human-readable indicator lines, one per supplied group, in form order.
    pub fn metric_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        let scopes = [
            ("Scope 1 (direct) emissions", &self.scope1_emissions),
            ("Scope 2 (indirect, energy) emissions", &self.scope2_emissions),
            ("Scope 3 (value chain) emissions", &self.scope3_emissions),
        ];
        for (label, figures) in scopes {
            if let Some(e) = figures {
                if let Some(current) = e.current_year {
                    lines.push(format!(
                        "{label}: {} tCO2e, {:.1}% reduction year over year, {:.1}% of target",
                        amount(current),
                        reduction_pct(e.current_year, e.previous_year),
                        achievement_pct(e.current_year, e.target),
                    ));
                }
            }
        }

        if let Some(e) = &self.energy_usage {
            if let Some(total) = e.total_usage {
                let mut line = format!("Energy use: {} MWh total", amount(total));
                if let Some(share) = share_pct(e.renewable_usage, e.total_usage) {
                    line.push_str(&format!(", {share:.1}% renewable"));
                }
                line.push_str(&format!(
                    ", {:.1}% of renewable target",
                    achievement_pct(e.renewable_usage, e.renewable_target)
                ));
                lines.push(line);
            }
        }

        if let Some(w) = &self.waste_management {
            if let Some(total) = w.total_waste {
                let mut line = format!("Waste: {} t generated", amount(total));
                if let Some(rate) = share_pct(w.recycled_waste, w.total_waste) {
                    line.push_str(&format!(", {rate:.1}% recycled"));
                }
                line.push_str(&format!(
                    ", {:.1}% of recycling target",
                    achievement_pct(w.recycled_waste, w.recycling_target)
                ));
                lines.push(line);
            }
        }

        if let Some(w) = &self.water_usage {
            if let Some(current) = w.current_year {
                lines.push(format!(
                    "Water use: {} m³, {:.1}% reduction year over year, {:.1}% of reduction target",
                    amount(current),
                    reduction_pct(w.current_year, w.previous_year),
                    achievement_pct(w.current_year, w.reduction_target),
                ));
            }
        }

        if let Some(tech) = &self.eco_friendly_tech {
            if let Some(name) = tech.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                let mut line = format!("Eco-friendly technology: {name}");
                if let Some(date) = non_blank(&tech.implementation_date) {
                    line.push_str(&format!(" (introduced {date})"));
                }
                if let Some(impact) = non_blank(&tech.expected_impact) {
                    line.push_str(&format!("; expected impact: {impact}"));
                }
                lines.push(line);
            }
        }

        if !lines.is_empty() {
            if let Some(overall) = self.overall_achievement() {
                lines.push(format!("Average target achievement: {overall:.1}%"));
            }
        }

        lines
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Whole numbers print without a trailing `.0`.
fn amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reduction_pct() {
        assert_eq!(reduction_pct(Some(80.0), Some(100.0)), 20.0);
        assert_eq!(reduction_pct(Some(120.0), Some(100.0)), -20.0);
    }

    #[test]
    fn test_reduction_pct_is_zero_without_usable_inputs() {
        assert_eq!(reduction_pct(None, Some(100.0)), 0.0);
        assert_eq!(reduction_pct(Some(50.0), Some(0.0)), 0.0);
        assert_eq!(reduction_pct(Some(0.0), Some(100.0)), 0.0);
    }

    #[test]
    fn test_achievement_pct() {
        assert_eq!(achievement_pct(Some(45.0), Some(60.0)), 75.0);
        assert_eq!(achievement_pct(Some(45.0), None), 0.0);
    }

    #[test]
    fn test_share_pct_requires_total() {
        assert_eq!(share_pct(Some(35.0), Some(100.0)), Some(35.0));
        assert_eq!(share_pct(Some(35.0), Some(0.0)), None);
        assert_eq!(share_pct(None, Some(100.0)), Some(0.0));
    }

    #[test]
    fn test_rejects_non_finite_strings() {
        for raw in ["NaN", "inf", "-Infinity", "1e400"] {
            let result = serde_json::from_value::<EsgMetrics>(json!({
                "scope1Emissions": {"previousYear": "100", "currentYear": raw}
            }));
            assert!(result.is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_deserializes_form_strings_and_blanks() {
        let metrics: EsgMetrics = serde_json::from_value(json!({
            "scope1Emissions": {"previousYear": "1000", "currentYear": 880, "target": ""},
            "energyUsage": {"totalUsage": "2000.5"}
        }))
        .unwrap();

        let scope1 = metrics.scope1_emissions.unwrap();
        assert_eq!(scope1.previous_year, Some(1000.0));
        assert_eq!(scope1.current_year, Some(880.0));
        assert_eq!(scope1.target, None);
        assert_eq!(metrics.energy_usage.unwrap().total_usage, Some(2000.5));
    }

    #[test]
    fn test_rejects_non_numeric_strings() {
        let result: Result<EsgMetrics, _> = serde_json::from_value(json!({
            "waterUsage": {"currentYear": "lots"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_metric_lines_for_scope_and_waste() {
        let metrics = EsgMetrics {
            scope1_emissions: Some(EmissionFigures {
                previous_year: Some(1000.0),
                current_year: Some(880.0),
                target: Some(800.0),
            }),
            waste_management: Some(WasteFigures {
                total_waste: Some(200.0),
                recycled_waste: Some(130.0),
                recycling_target: Some(150.0),
            }),
            ..Default::default()
        };

        let lines = metrics.metric_lines();
        assert_eq!(
            lines[0],
            "Scope 1 (direct) emissions: 880 tCO2e, 12.0% reduction year over year, 110.0% of target"
        );
        assert_eq!(
            lines[1],
            "Waste: 200 t generated, 65.0% recycled, 86.7% of recycling target"
        );
        assert!(lines[2].starts_with("Average target achievement:"));
    }

    #[test]
    fn test_overall_achievement_counts_missing_groups_as_zero() {
        let metrics = EsgMetrics {
            water_usage: Some(WaterFigures {
                previous_year: Some(100.0),
                current_year: Some(90.0),
                reduction_target: Some(90.0),
            }),
            ..Default::default()
        };
        let overall = metrics.overall_achievement().unwrap();
        assert!((overall - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_metrics_produce_no_lines() {
        let metrics = EsgMetrics::default();
        assert!(metrics.metric_lines().is_empty());
        assert_eq!(metrics.overall_achievement(), None);
    }

    #[test]
    fn test_eco_tech_line() {
        let metrics = EsgMetrics {
            eco_friendly_tech: Some(EcoTech {
                name: Some("Heat recovery".to_string()),
                implementation_date: Some("2024-03-01".to_string()),
                expected_impact: Some("8% less gas".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(
            metrics.metric_lines(),
            vec!["Eco-friendly technology: Heat recovery (introduced 2024-03-01); expected impact: 8% less gas"]
        );
    }
}
