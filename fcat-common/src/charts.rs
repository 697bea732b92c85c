//! Radar chart axis definitions and scores
//!
//! Each card shows a Core Performance chart; the detail view adds three more.
//! The chart renderer is a thin consumer of the normalized scores computed
//! here.

use serde::Serialize;

use crate::model::Filament;
use crate::normalize::normalize_spec_value;

/// One radar axis: spec key, short label and tooltip description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartAxis {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// The four radar charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Chart {
    CorePerformance,
    QualityUsability,
    SafetyEnvironmental,
    AdvancedProperties,
}

impl Chart {
    pub const ALL: [Chart; 4] = [
        Chart::CorePerformance,
        Chart::QualityUsability,
        Chart::SafetyEnvironmental,
        Chart::AdvancedProperties,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Chart::CorePerformance => "Core Performance",
            Chart::QualityUsability => "Quality & Usability",
            Chart::SafetyEnvironmental => "Safety & Environmental",
            Chart::AdvancedProperties => "Advanced Properties",
        }
    }

    pub fn axes(&self) -> &'static [ChartAxis] {
        match self {
            Chart::CorePerformance => CORE_PERFORMANCE,
            Chart::QualityUsability => QUALITY_USABILITY,
            Chart::SafetyEnvironmental => SAFETY_ENVIRONMENTAL,
            Chart::AdvancedProperties => ADVANCED_PROPERTIES,
        }
    }
}

const fn axis(key: &'static str, label: &'static str, description: &'static str) -> ChartAxis {
    ChartAxis { key, label, description }
}

const CORE_PERFORMANCE: &[ChartAxis] = &[
    axis("warping", "Warping", "How much the material bends during printing. Low warping means easier printing with fewer failed prints and better dimensional accuracy."),
    axis("temperature_resistance", "Temp", "Maximum temperature before the material deforms or loses its shape. Higher values mean better performance in hot environments."),
    axis("flexibility", "Flex", "How much the material can bend before breaking. Higher flexibility means parts that absorb impacts and stress without cracking."),
    axis("tensile_strength", "Strength", "Resistance to breaking when pulled apart. Higher tensile strength means parts that handle more load."),
    axis("impact_resistance", "Impact", "Resistance to breaking from sudden force. Higher impact resistance means parts that survive drops and hits."),
    axis("print_speed", "Speed", "How fast you can print without quality issues."),
];

const QUALITY_USABILITY: &[ChartAxis] = &[
    axis("surface_quality", "Surface", "How good the final print looks. Higher values mean smoother surfaces with less visible layer lines."),
    axis("cost_effectiveness", "Value", "Price versus performance. Higher values mean good performance at a reasonable price."),
    axis("post_processing", "Finish", "How easy the print is to sand, paint and finish."),
    axis("ease_of_printing", "Easy", "How forgiving the material is. Higher values mean less tuning and more consistent results."),
    axis("layer_adhesion", "Adhesion", "How well layers stick together. Higher values mean stronger inter-layer bonding."),
    axis("dimensional_accuracy", "Accuracy", "How closely printed dimensions match the design."),
];

const SAFETY_ENVIRONMENTAL: &[ChartAxis] = &[
    axis("voc_emissions", "VOC", "Volatile organic compounds released during printing."),
    axis("toxicity", "Toxicity", "Health safety level of handling and printing."),
    axis("biodegradability", "Bio", "How well the material breaks down naturally."),
    axis("recyclability", "Recycle", "How easily the material can be recycled."),
    axis("chemical_safety", "Safety", "Chemical safety of the material in use."),
    axis("storage_requirements", "Storage", "How demanding the material is to store."),
];

const ADVANCED_PROPERTIES: &[ChartAxis] = &[
    axis("electrical_conductivity", "Electrical", "Ability to conduct electricity."),
    axis("food_safety", "Food", "Suitability for food contact."),
    axis("medical_grade", "Medical", "Availability of medical-grade variants."),
    axis("uv_resistance", "UV", "Resistance to degradation under sunlight."),
    axis("chemical_resistance", "Chemical", "Resistance to solvents, oils and other chemicals."),
    axis("creep_resistance", "Creep", "Resistance to slow deformation under sustained load."),
];

/// Score of one filament on one chart axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisScore {
    pub key: &'static str,
    pub label: &'static str,
    /// What the axis measures, shown alongside the score
    pub description: &'static str,
    /// Original spec text, `None` when absent or not a string
    pub raw: Option<String>,
    /// Normalized score in [0.0, 1.0]
    pub score: f64,
}

impl AxisScore {
    /// Score on the chart's 0-100 radial scale
    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }

    /// Tooltip body: `<raw> (<percent>%)`, with `N/A` for missing values
    pub fn tooltip(&self) -> String {
        format!("{} ({:.0}%)", self.raw.as_deref().unwrap_or("N/A"), self.percent())
    }
}

/// Scores for every axis of a chart, `None` when the filament has no specs
pub fn radar_scores(filament: &Filament, chart: Chart) -> Option<Vec<AxisScore>> {
    filament.specs.as_ref()?;

    let scores = chart
        .axes()
        .iter()
        .map(|axis| {
            let value = filament.spec_value(axis.key);
            AxisScore {
                key: axis.key,
                label: axis.label,
                description: axis.description,
                raw: value.and_then(|v| v.as_str()).map(str::to_string),
                score: normalize_spec_value(value, axis.key),
            }
        })
        .collect();

    Some(scores)
}

/// One dataset of a comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub filament: String,
    pub scores: Vec<AxisScore>,
}

/// Per-filament series for a comparison chart
///
/// Filaments without specs contribute an all-zero series so every column
/// stays aligned with the comparison table.
pub fn comparison_series(filaments: &[&Filament], chart: Chart) -> Vec<ChartSeries> {
    filaments
        .iter()
        .map(|f| ChartSeries {
            filament: f.name.clone(),
            scores: radar_scores(f, chart).unwrap_or_else(|| {
                chart
                    .axes()
                    .iter()
                    .map(|axis| AxisScore {
                        key: axis.key,
                        label: axis.label,
                        description: axis.description,
                        raw: None,
                        score: normalize_spec_value(None, axis.key),
                    })
                    .collect()
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Specs, Tier};

    fn petg() -> Filament {
        let mut f = Filament::new("PETG", Tier::A);
        let mut specs = Specs::new();
        specs.insert("warping", "Low");
        specs.insert("temperature_resistance", "80°C (glass transition)");
        specs.insert("flexibility", "Moderate");
        specs.insert("print_speed", "whatever");
        f.specs = Some(specs);
        f
    }

    #[test]
    fn test_every_chart_has_six_axes() {
        for chart in Chart::ALL {
            assert_eq!(chart.axes().len(), 6, "{}", chart.title());
        }
    }

    #[test]
    fn test_core_performance_scores() {
        let scores = radar_scores(&petg(), Chart::CorePerformance).unwrap();
        let by_key = |k: &str| scores.iter().find(|s| s.key == k).unwrap().score;

        assert_eq!(by_key("warping"), 0.8);
        assert_eq!(by_key("temperature_resistance"), 0.2);
        assert_eq!(by_key("flexibility"), 0.6);
        // Missing spec scores zero, unparsed text scores neutral
        assert_eq!(by_key("tensile_strength"), 0.0);
        assert_eq!(by_key("print_speed"), 0.5);
    }

    #[test]
    fn test_no_specs_means_no_chart() {
        assert!(radar_scores(&Filament::new("Mystery", Tier::F), Chart::CorePerformance).is_none());
    }

    #[test]
    fn test_tooltip() {
        let scores = radar_scores(&petg(), Chart::CorePerformance).unwrap();
        assert_eq!(scores[0].tooltip(), "Low (80%)");
        assert_eq!(scores[3].tooltip(), "N/A (0%)");
    }

    #[test]
    fn test_scores_carry_axis_description() {
        let scores = radar_scores(&petg(), Chart::CorePerformance).unwrap();
        assert!(scores[0].description.starts_with("How much the material bends"));
        for chart in Chart::ALL {
            assert!(chart.axes().iter().all(|a| !a.description.is_empty()));
        }
    }

    #[test]
    fn test_comparison_series_one_per_filament() {
        let a = petg();
        let b = Filament::new("Bare", Tier::C);
        let series = comparison_series(&[&a, &b], Chart::QualityUsability);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].filament, "Bare");
        assert!(series[1].scores.iter().all(|s| s.score == 0.0));
    }
}
