//! Filament record model
//!
//! Records are loaded once per session and never mutated afterwards. Text
//! fields are optional in the dataset; every text operation treats an absent
//! field as the empty string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Coarse quality ranking bucket
///
/// The dataset is not schema-validated, so tiers outside S/A/B/C/F are kept
/// verbatim in `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    S,
    A,
    B,
    C,
    F,
    Other(String),
}

impl Tier {
    /// The five tiers offered by the tier checklist, best first
    pub const KNOWN: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::F];

    pub fn as_str(&self) -> &str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::F => "F",
            Tier::Other(s) => s,
        }
    }

    /// Parse a tier label exactly (case-sensitive, like the dataset values)
    pub fn parse(label: &str) -> Tier {
        match label {
            "S" => Tier::S,
            "A" => Tier::A,
            "B" => Tier::B,
            "C" => Tier::C,
            "F" => Tier::F,
            other => Tier::Other(other.to_string()),
        }
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Tier::parse(&value)
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.as_str().to_string()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specification values keyed by spec name (`warping`, `print_speed`, ...)
///
/// Values are kept as raw JSON so callers can tell a missing or non-string
/// value apart from a string the normalizer could not classify.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specs(BTreeMap<String, Value>);

impl Specs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for a spec key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Spec value when it is a non-empty string
    ///
    /// Empty strings count as missing, matching how the flag predicates and
    /// detail grid skip falsy values.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All values joined by single spaces, for free-text search
    ///
    /// Strings are used verbatim, `null` renders empty, anything else as its
    /// JSON text.
    pub fn joined_values(&self) -> String {
        self.0
            .values()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Specs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Specs(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One filament material record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filament {
    /// Unique within a dataset; the comparison-set key
    pub name: String,
    pub tier: Tier,
    /// Nozzle temperature text (e.g. "190-220°C")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub enclosure: bool,
    #[serde(default)]
    pub hygroscopic: bool,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<Specs>,
}

impl Filament {
    /// Minimal record with the given name and tier
    pub fn new(name: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            tier,
            temp: None,
            use_cases: None,
            notes: None,
            enclosure: false,
            hygroscopic: false,
            badges: Vec::new(),
            specs: None,
        }
    }

    pub fn temp_text(&self) -> &str {
        self.temp.as_deref().unwrap_or("")
    }

    pub fn use_cases_text(&self) -> &str {
        self.use_cases.as_deref().unwrap_or("")
    }

    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    /// Raw spec value, `None` when the record has no specs or lacks the key
    pub fn spec_value(&self, key: &str) -> Option<&Value> {
        self.specs.as_ref().and_then(|s| s.get(key))
    }

    /// Non-empty string spec value
    pub fn spec_text(&self, key: &str) -> Option<&str> {
        self.specs.as_ref().and_then(|s| s.text(key))
    }

    /// Card meta line: `Nozzle: <temp> · <use cases>`
    pub fn meta_line(&self) -> String {
        format!("Nozzle: {} · {}", self.temp_text(), self.use_cases_text())
    }

    /// Labelled spec values for the card detail grid, in display order,
    /// skipping keys that are missing or empty
    pub fn detail_specs(&self) -> Vec<(&'static str, &str)> {
        DETAIL_SPEC_FIELDS
            .iter()
            .filter_map(|field| self.spec_text(field.key).map(|v| (field.label, v)))
            .collect()
    }
}

/// A known spec key with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecField {
    pub key: &'static str,
    pub label: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> SpecField {
    SpecField { key, label }
}

/// Spec keys shown in a card's detail grid, grouped core → durability
pub const DETAIL_SPEC_FIELDS: &[SpecField] = &[
    // Core properties
    field("warping", "Warping"),
    field("temperature_resistance", "Temperature Resistance"),
    field("flexibility", "Flexibility"),
    field("tensile_strength", "Tensile Strength"),
    field("impact_resistance", "Impact Resistance"),
    field("chemical_resistance", "Chemical Resistance"),
    field("uv_resistance", "UV Resistance"),
    field("bed_temp", "Bed Temperature"),
    field("print_speed", "Print Speed"),
    field("layer_adhesion", "Layer Adhesion"),
    field("shrinkage", "Shrinkage"),
    field("density", "Density"),
    // Quality & usability
    field("surface_quality", "Surface Quality"),
    field("cost_effectiveness", "Cost Effectiveness"),
    field("post_processing", "Post-Processing"),
    field("ease_of_printing", "Ease of Printing"),
    field("dimensional_accuracy", "Dimensional Accuracy"),
    // Safety & environmental
    field("voc_emissions", "VOC Emissions"),
    field("toxicity", "Toxicity Level"),
    field("biodegradability", "Biodegradability"),
    field("recyclability", "Recyclability"),
    field("chemical_safety", "Chemical Safety"),
    field("storage_requirements", "Storage Requirements"),
    // Cost & availability
    field("price_range", "Price Range"),
    field("availability", "Availability"),
    field("shelf_life", "Shelf Life"),
    // Advanced properties
    field("electrical_conductivity", "Electrical Conductivity"),
    field("food_safety", "Food Safety"),
    field("medical_grade", "Medical Grade"),
    // Print settings
    field("layer_height_range", "Layer Height Range"),
    field("support_requirements", "Support Requirements"),
    field("retraction_settings", "Retraction Settings"),
    field("cooling_requirements", "Cooling Requirements"),
    // Durability & aging
    field("uv_degradation", "UV Degradation"),
    field("creep_resistance", "Creep Resistance"),
    field("fatigue_resistance", "Fatigue Resistance"),
];

/// Spec rows of the side-by-side comparison table
pub const COMPARISON_SPEC_FIELDS: &[SpecField] = &[
    field("warping", "Warping"),
    field("temperature_resistance", "Temp Resistance"),
    field("flexibility", "Flexibility"),
    field("tensile_strength", "Tensile Strength"),
    field("impact_resistance", "Impact Resistance"),
    field("chemical_resistance", "Chemical Resistance"),
    field("uv_resistance", "UV Resistance"),
    field("bed_temp", "Bed Temp"),
    field("print_speed", "Print Speed"),
    field("layer_adhesion", "Layer Adhesion"),
    field("shrinkage", "Shrinkage"),
    field("density", "Density"),
    field("surface_quality", "Surface Quality"),
    field("cost_effectiveness", "Cost Effectiveness"),
    field("post_processing", "Post-Processing"),
    field("ease_of_printing", "Ease of Printing"),
    field("voc_emissions", "VOC Emissions"),
    field("toxicity", "Toxicity Level"),
    field("biodegradability", "Biodegradability"),
    field("recyclability", "Recyclability"),
    field("price_range", "Price Range"),
    field("availability", "Availability"),
    field("shelf_life", "Shelf Life"),
    field("electrical_conductivity", "Electrical Conductivity"),
    field("food_safety", "Food Safety"),
    field("medical_grade", "Medical Grade"),
    field("layer_height_range", "Layer Height Range"),
    field("support_requirements", "Support Requirements"),
    field("retraction_settings", "Retraction Settings"),
    field("cooling_requirements", "Cooling Requirements"),
    field("uv_degradation", "UV Degradation"),
    field("creep_resistance", "Creep Resistance"),
    field("fatigue_resistance", "Fatigue Resistance"),
];

/// Look up a filament by exact name
pub fn find_by_name<'a>(filaments: &'a [Filament], name: &str) -> Option<&'a Filament> {
    filaments.iter().find(|f| f.name == name)
}
