//! Spec value normalization
//!
//! Maps a free-text specification value ("Very High", "60°C (glass
//! transition)") onto a comparable score in [0.0, 1.0] for radar charts.
//!
//! # Rules
//! - A value that is absent or not a string scores `0.0`.
//! - A string is lowercased and tested against the category's ordered
//!   phrase buckets; the first bucket containing a matching phrase wins.
//! - A string matching no bucket, or any string for an unknown category,
//!   scores the neutral default `0.5`.
//!
//! Bucket order is significant: "very high" is tested before "high", while
//! some later buckets ("very low" after "low") are shadowed by earlier ones
//! and never match.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Score for a string no bucket recognises
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Score for a value that is absent or not a string
pub const MISSING_SCORE: f64 = 0.0;

/// Temperature that maps to a full score
pub const MAX_TEMPERATURE_C: f64 = 400.0;

/// First integer immediately followed by a lowercase degrees-Celsius marker
static CELSIUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)°c").expect("valid regex"));

/// Spec categories with a scoring table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecCategory {
    Warping,
    TemperatureResistance,
    Flexibility,
    TensileStrength,
    ImpactResistance,
    ChemicalResistance,
    UvResistance,
    PrintSpeed,
    LayerAdhesion,
    SurfaceQuality,
    CostEffectiveness,
    PostProcessing,
    EaseOfPrinting,
}

impl SpecCategory {
    /// Category for a spec key, `None` for keys without a scoring table
    pub fn from_key(key: &str) -> Option<Self> {
        let category = match key {
            "warping" => SpecCategory::Warping,
            "temperature_resistance" => SpecCategory::TemperatureResistance,
            "flexibility" => SpecCategory::Flexibility,
            "tensile_strength" => SpecCategory::TensileStrength,
            "impact_resistance" => SpecCategory::ImpactResistance,
            "chemical_resistance" => SpecCategory::ChemicalResistance,
            "uv_resistance" => SpecCategory::UvResistance,
            "print_speed" => SpecCategory::PrintSpeed,
            "layer_adhesion" => SpecCategory::LayerAdhesion,
            "surface_quality" => SpecCategory::SurfaceQuality,
            "cost_effectiveness" => SpecCategory::CostEffectiveness,
            "post_processing" => SpecCategory::PostProcessing,
            "ease_of_printing" => SpecCategory::EaseOfPrinting,
            _ => return None,
        };
        Some(category)
    }

    /// Ordered phrase buckets; `None` for temperature, which is parsed
    fn buckets(&self) -> Option<&'static [Bucket]> {
        let table: &'static [Bucket] = match self {
            SpecCategory::Warping => WARPING,
            SpecCategory::TemperatureResistance => return None,
            SpecCategory::Flexibility => FLEXIBILITY,
            SpecCategory::TensileStrength
            | SpecCategory::ImpactResistance
            | SpecCategory::ChemicalResistance
            | SpecCategory::UvResistance => RESISTANCE,
            SpecCategory::PrintSpeed => PRINT_SPEED,
            SpecCategory::LayerAdhesion => LAYER_ADHESION,
            SpecCategory::SurfaceQuality => SURFACE_QUALITY,
            SpecCategory::CostEffectiveness => COST_EFFECTIVENESS,
            SpecCategory::PostProcessing => POST_PROCESSING,
            SpecCategory::EaseOfPrinting => EASE_OF_PRINTING,
        };
        Some(table)
    }
}

/// Phrases that select a score
type Bucket = (&'static [&'static str], f64);

// Inverse scale: little warping is good.
const WARPING: &[Bucket] = &[
    (&["extreme"], 0.0),
    (&["very high"], 0.2),
    (&["high"], 0.4),
    (&["medium"], 0.6),
    (&["low"], 0.8),
];

const FLEXIBILITY: &[Bucket] = &[
    (&["very high", "rubber-like"], 1.0),
    (&["high"], 0.8),
    (&["moderate"], 0.6),
    (&["low"], 0.4),
    (&["very low", "stiff"], 0.2),
];

const RESISTANCE: &[Bucket] = &[
    (&["very high"], 1.0),
    (&["high"], 0.8),
    (&["moderate"], 0.6),
    (&["low"], 0.4),
    (&["very low"], 0.2),
];

const PRINT_SPEED: &[Bucket] = &[
    (&["very fast"], 1.0),
    (&["fast"], 0.8),
    (&["moderate"], 0.6),
    (&["slow"], 0.4),
    (&["very slow"], 0.2),
];

const LAYER_ADHESION: &[Bucket] = &[
    (&["excellent"], 1.0),
    (&["good"], 0.8),
    (&["moderate"], 0.6),
    (&["poor"], 0.4),
    (&["very poor"], 0.2),
];

const SURFACE_QUALITY: &[Bucket] = &[
    (&["excellent", "mirror"], 1.0),
    (&["high", "smooth"], 0.8),
    (&["moderate", "good"], 0.6),
    (&["low", "rough"], 0.4),
    (&["very low", "poor"], 0.2),
];

const COST_EFFECTIVENESS: &[Bucket] = &[
    (&["excellent", "very high"], 1.0),
    (&["high", "good value"], 0.8),
    (&["moderate", "fair"], 0.6),
    (&["low", "poor value"], 0.4),
    (&["very low", "expensive"], 0.2),
];

const POST_PROCESSING: &[Bucket] = &[
    (&["excellent", "very easy"], 1.0),
    (&["good", "easy"], 0.8),
    (&["moderate", "fair"], 0.6),
    (&["poor", "difficult"], 0.4),
    (&["very poor", "very difficult"], 0.2),
];

const EASE_OF_PRINTING: &[Bucket] = &[
    (&["very high", "excellent", "beginner"], 1.0),
    (&["high", "easy", "forgiving"], 0.8),
    (&["moderate", "fair"], 0.6),
    (&["low", "difficult", "challenging"], 0.4),
    (&["very low", "expert", "very difficult"], 0.2),
];

/// Normalize a raw spec value for the given spec key
///
/// # Examples
/// ```
/// use fcat_common::normalize::normalize_spec_value;
/// use serde_json::json;
///
/// assert_eq!(normalize_spec_value(Some(&json!("Very High")), "flexibility"), 1.0);
/// assert_eq!(normalize_spec_value(Some(&json!("500°C")), "temperature_resistance"), 1.0);
/// assert_eq!(normalize_spec_value(Some(&json!("unclear")), "warping"), 0.5);
/// assert_eq!(normalize_spec_value(None, "warping"), 0.0);
/// ```
pub fn normalize_spec_value(value: Option<&Value>, key: &str) -> f64 {
    match value {
        Some(Value::String(text)) => normalize_text(text, key),
        _ => MISSING_SCORE,
    }
}

/// Normalize a spec string for the given spec key
pub fn normalize_text(text: &str, key: &str) -> f64 {
    match SpecCategory::from_key(key) {
        Some(category) => normalize_category(text, category),
        None => NEUTRAL_SCORE,
    }
}

/// Normalize a spec string against a known category
pub fn normalize_category(text: &str, category: SpecCategory) -> f64 {
    let lower = text.to_lowercase();

    let score = match category.buckets() {
        Some(buckets) => match_bucket(&lower, buckets),
        None => parse_celsius(&lower).map(|celsius| (celsius / MAX_TEMPERATURE_C).min(1.0)),
    };

    score.unwrap_or_else(|| {
        debug!("No {:?} score for '{}', using neutral default", category, text);
        NEUTRAL_SCORE
    })
}

/// First degrees-Celsius reading in an already lowercased string
pub(crate) fn parse_celsius(lower: &str) -> Option<f64> {
    CELSIUS
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn match_bucket(lower: &str, buckets: &[Bucket]) -> Option<f64> {
    buckets
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| lower.contains(p)))
        .map(|(_, score)| *score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn score(text: &str, key: &str) -> f64 {
        normalize_spec_value(Some(&json!(text)), key)
    }

    #[test]
    fn test_warping_inverse_scale() {
        assert_eq!(score("Extreme", "warping"), 0.0);
        assert_eq!(score("Very High", "warping"), 0.2);
        assert_eq!(score("High", "warping"), 0.4);
        assert_eq!(score("Medium", "warping"), 0.6);
        assert_eq!(score("Low", "warping"), 0.8);
        assert_eq!(score("Very Low", "warping"), 0.8);
    }

    #[test]
    fn test_very_high_checked_before_high() {
        assert_eq!(score("Very High Flexibility", "flexibility"), 1.0);
        assert_eq!(score("High", "flexibility"), 0.8);
        assert_eq!(score("Rubber-like", "flexibility"), 1.0);
    }

    #[test]
    fn test_shadowed_buckets_are_preserved() {
        // "very low" contains "low", which is tested first
        assert_eq!(score("Very Low", "flexibility"), 0.4);
        assert_eq!(score("Stiff", "flexibility"), 0.2);
        assert_eq!(score("Very Slow", "print_speed"), 0.4);
        assert_eq!(score("Very Poor", "layer_adhesion"), 0.4);
    }

    #[test]
    fn test_temperature_parsing() {
        assert!((score("130°C (continuous use)", "temperature_resistance") - 0.325).abs() < 1e-12);
        assert_eq!(score("60°C (glass transition)", "temperature_resistance"), 0.15);
        assert_eq!(score("500°C", "temperature_resistance"), 1.0);
        assert_eq!(score("hot", "temperature_resistance"), NEUTRAL_SCORE);
        // Degrees sign must follow the digits directly
        assert_eq!(score("130 °C", "temperature_resistance"), NEUTRAL_SCORE);
    }

    #[test]
    fn test_temperature_digits_are_ascii_only() {
        // Arabic-Indic one is not a digit here; the reading is the ASCII "1"
        assert_eq!(normalize_text("\u{0661}1°C", "temperature_resistance"), 1.0 / MAX_TEMPERATURE_C);
        assert_eq!(parse_celsius("\u{0661}\u{0662}°c"), None);
    }

    #[test]
    fn test_category_synonyms() {
        assert_eq!(score("Mirror-like", "surface_quality"), 1.0);
        assert_eq!(score("Smooth", "surface_quality"), 0.8);
        assert_eq!(score("Rough", "surface_quality"), 0.4);
        assert_eq!(score("Good value", "cost_effectiveness"), 0.8);
        assert_eq!(score("Expensive", "cost_effectiveness"), 0.2);
        assert_eq!(score("Very easy to sand", "post_processing"), 1.0);
        assert_eq!(score("Beginner friendly", "ease_of_printing"), 1.0);
        assert_eq!(score("Expert only", "ease_of_printing"), 0.2);
    }

    #[test]
    fn test_unknown_category_is_neutral() {
        assert_eq!(score("Very High", "voc_emissions"), NEUTRAL_SCORE);
        assert_eq!(score("", "anything"), NEUTRAL_SCORE);
    }

    #[test]
    fn test_non_string_scores_zero() {
        assert_eq!(normalize_spec_value(None, "warping"), 0.0);
        assert_eq!(normalize_spec_value(Some(&json!(null)), "warping"), 0.0);
        assert_eq!(normalize_spec_value(Some(&json!(250)), "temperature_resistance"), 0.0);
        assert_eq!(normalize_spec_value(Some(&json!(true)), "voc_emissions"), 0.0);
    }
}
