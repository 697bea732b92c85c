//! Boolean flags read straight off raw spec text
//!
//! A flag is a case-insensitive substring test on one spec field. A missing,
//! empty or non-string field makes the flag false. This is not the
//! normalizer's neutral default: a filament with no `toxicity` entry is not
//! "low toxicity".

use serde::{Deserialize, Serialize};

use crate::model::Filament;
use crate::normalize::parse_celsius;

/// Temperatures above this count as high-temperature resistant
const HIGH_TEMPERATURE_C: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecFlag {
    Flexible,
    Strong,
    HighImpact,
    LowWarping,
    HighTemp,
    FastPrint,
    EasyPrint,
    GoodSurface,
    LowToxicity,
    LowVoc,
    Biodegradable,
    Recyclable,
    FoodSafe,
    MedicalGrade,
    Conductive,
    UvResistant,
}

impl SpecFlag {
    pub const ALL: [SpecFlag; 16] = [
        SpecFlag::Flexible,
        SpecFlag::Strong,
        SpecFlag::HighImpact,
        SpecFlag::LowWarping,
        SpecFlag::HighTemp,
        SpecFlag::FastPrint,
        SpecFlag::EasyPrint,
        SpecFlag::GoodSurface,
        SpecFlag::LowToxicity,
        SpecFlag::LowVoc,
        SpecFlag::Biodegradable,
        SpecFlag::Recyclable,
        SpecFlag::FoodSafe,
        SpecFlag::MedicalGrade,
        SpecFlag::Conductive,
        SpecFlag::UvResistant,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SpecFlag::Flexible => "flexible",
            SpecFlag::Strong => "strong",
            SpecFlag::HighImpact => "high-impact",
            SpecFlag::LowWarping => "low-warping",
            SpecFlag::HighTemp => "high-temp",
            SpecFlag::FastPrint => "fast-print",
            SpecFlag::EasyPrint => "easy-print",
            SpecFlag::GoodSurface => "good-surface",
            SpecFlag::LowToxicity => "low-toxicity",
            SpecFlag::LowVoc => "low-voc",
            SpecFlag::Biodegradable => "biodegradable",
            SpecFlag::Recyclable => "recyclable",
            SpecFlag::FoodSafe => "food-safe",
            SpecFlag::MedicalGrade => "medical-grade",
            SpecFlag::Conductive => "conductive",
            SpecFlag::UvResistant => "uv-resistant",
        }
    }

    /// Spec field the flag reads
    pub fn spec_key(&self) -> &'static str {
        match self {
            SpecFlag::Flexible => "flexibility",
            SpecFlag::Strong => "tensile_strength",
            SpecFlag::HighImpact => "impact_resistance",
            SpecFlag::LowWarping => "warping",
            SpecFlag::HighTemp => "temperature_resistance",
            SpecFlag::FastPrint => "print_speed",
            SpecFlag::EasyPrint => "ease_of_printing",
            SpecFlag::GoodSurface => "surface_quality",
            SpecFlag::LowToxicity => "toxicity",
            SpecFlag::LowVoc => "voc_emissions",
            SpecFlag::Biodegradable => "biodegradability",
            SpecFlag::Recyclable => "recyclability",
            SpecFlag::FoodSafe => "food_safety",
            SpecFlag::MedicalGrade => "medical_grade",
            SpecFlag::Conductive => "electrical_conductivity",
            SpecFlag::UvResistant => "uv_resistance",
        }
    }

    /// Phrases any of which sets the flag
    ///
    /// "very high" / "very low" are implied by "high" / "low" and not listed.
    fn phrases(&self) -> &'static [&'static str] {
        match self {
            SpecFlag::Flexible => &["high", "rubber-like"],
            SpecFlag::Strong | SpecFlag::HighImpact => &["high"],
            SpecFlag::LowWarping | SpecFlag::LowToxicity | SpecFlag::LowVoc => &["low"],
            SpecFlag::HighTemp => &["high"],
            SpecFlag::FastPrint => &["fast"],
            SpecFlag::EasyPrint => &["high", "beginner", "easy"],
            SpecFlag::GoodSurface => &["high", "excellent", "smooth"],
            SpecFlag::Biodegradable => &["high", "yes", "biodegradable"],
            SpecFlag::Recyclable => &["yes", "recyclable"],
            SpecFlag::FoodSafe => &["safe", "yes"],
            SpecFlag::MedicalGrade => &["yes", "medical", "grade"],
            SpecFlag::Conductive => &["conductive", "conducting"],
            SpecFlag::UvResistant => &["high", "excellent"],
        }
    }

    pub fn matches(&self, filament: &Filament) -> bool {
        let Some(text) = filament.spec_text(self.spec_key()) else {
            return false;
        };
        let lower = text.to_lowercase();

        if self.phrases().iter().any(|p| lower.contains(p)) {
            return true;
        }

        // High temperature also accepts an explicit reading above 100°C
        *self == SpecFlag::HighTemp
            && lower.contains("°c")
            && parse_celsius(&lower).is_some_and(|c| c > HIGH_TEMPERATURE_C)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Specs, Tier};
    use serde_json::json;

    fn with_spec(key: &str, value: serde_json::Value) -> Filament {
        let mut f = Filament::new("Test", Tier::B);
        let mut specs = Specs::new();
        specs.insert(key, value);
        f.specs = Some(specs);
        f
    }

    #[test]
    fn test_missing_spec_is_false() {
        let bare = Filament::new("Bare", Tier::A);
        for flag in SpecFlag::ALL {
            assert!(!flag.matches(&bare), "{:?}", flag);
        }
        assert!(!SpecFlag::LowToxicity.matches(&with_spec("toxicity", json!(""))));
        assert!(!SpecFlag::LowToxicity.matches(&with_spec("toxicity", json!(1))));
    }

    #[test]
    fn test_polarity() {
        assert!(SpecFlag::LowWarping.matches(&with_spec("warping", json!("Very Low"))));
        assert!(!SpecFlag::LowWarping.matches(&with_spec("warping", json!("High"))));
        assert!(SpecFlag::Flexible.matches(&with_spec("flexibility", json!("Rubber-like"))));
        assert!(SpecFlag::Strong.matches(&with_spec("tensile_strength", json!("Very High"))));
    }

    #[test]
    fn test_high_temp_accepts_reading_above_100() {
        assert!(SpecFlag::HighTemp.matches(&with_spec("temperature_resistance", json!("130°C (continuous use)"))));
        assert!(!SpecFlag::HighTemp.matches(&with_spec("temperature_resistance", json!("60°C (glass transition)"))));
        assert!(!SpecFlag::HighTemp.matches(&with_spec("temperature_resistance", json!("100°C"))));
        assert!(SpecFlag::HighTemp.matches(&with_spec("temperature_resistance", json!("High"))));
    }

    #[test]
    fn test_substring_quirks_are_kept() {
        // "Not food safe" still contains "safe"
        assert!(SpecFlag::FoodSafe.matches(&with_spec("food_safety", json!("Not food safe"))));
        assert!(SpecFlag::Conductive.matches(&with_spec("electrical_conductivity", json!("Conductive (~10^3 ohm-cm)"))));
        assert!(!SpecFlag::Recyclable.matches(&with_spec("recyclability", json!("No"))));
    }

    #[test]
    fn test_every_flag_positive_and_negative() {
        let cases = [
            (SpecFlag::Flexible, "High", "Stiff"),
            (SpecFlag::Strong, "High", "Moderate"),
            (SpecFlag::HighImpact, "Very High", "Low"),
            (SpecFlag::LowWarping, "Low", "High"),
            (SpecFlag::HighTemp, "250°C", "60°C"),
            (SpecFlag::FastPrint, "Fast", "Slow"),
            (SpecFlag::EasyPrint, "Beginner friendly", "Difficult"),
            (SpecFlag::GoodSurface, "Smooth", "Poor"),
            (SpecFlag::LowToxicity, "Low", "Moderate"),
            (SpecFlag::LowVoc, "Very Low", "High"),
            (SpecFlag::Biodegradable, "Yes (industrial composting)", "No"),
            (SpecFlag::Recyclable, "Recyclable (#7)", "No"),
            (SpecFlag::FoodSafe, "Yes", "No"),
            (SpecFlag::MedicalGrade, "Medical grade available", "No"),
            (SpecFlag::Conductive, "Conducting", "Insulator"),
            (SpecFlag::UvResistant, "Excellent", "Poor"),
        ];

        for (flag, positive, negative) in cases {
            assert!(flag.matches(&with_spec(flag.spec_key(), json!(positive))), "{:?} {}", flag, positive);
            assert!(!flag.matches(&with_spec(flag.spec_key(), json!(negative))), "{:?} {}", flag, negative);
        }

        assert!(SpecFlag::Biodegradable.matches(&with_spec("biodegradability", json!("Biodegradable"))));
        assert!(SpecFlag::MedicalGrade.matches(&with_spec("medical_grade", json!("USP Class VI grade"))));
    }
}
