//! Use-case and handling-requirement predicates

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Filament;

/// Intended use of a print
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UseCase {
    Aesthetic,
    Functional,
    Prototyping,
    Outdoor,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::Aesthetic,
        UseCase::Functional,
        UseCase::Prototyping,
        UseCase::Outdoor,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            UseCase::Aesthetic => "aesthetic",
            UseCase::Functional => "functional",
            UseCase::Prototyping => "prototyping",
            UseCase::Outdoor => "outdoor",
        }
    }

    /// Whether the filament suits this use case
    ///
    /// All text tests run on lowercased name, notes and use cases. The
    /// negative conditions (functional excludes decorative materials, outdoor
    /// excludes materials with limited or low UV resistance) change which
    /// filaments qualify and must stay exactly as written.
    pub fn matches(&self, filament: &Filament) -> bool {
        let name = filament.name.to_lowercase();
        let notes = filament.notes_text().to_lowercase();
        let use_cases = filament.use_cases_text().to_lowercase();

        match self {
            UseCase::Aesthetic => {
                any(&name, &["silk", "wood", "metal", "glow", "color", "matte"])
                    || any(&notes, &["aesthetic", "decorative", "display"])
                    || any(&use_cases, &["aesthetic", "decorative", "display"])
            }
            UseCase::Functional => {
                !any(&name, &["silk", "wood", "glow"])
                    && !any(&notes, &["aesthetic", "decorative"])
                    && any(&use_cases, &["functional", "parts", "mechanical"])
            }
            UseCase::Prototyping => {
                any(&name, &["high-speed", "rapid"]) || any(&use_cases, &["prototyping", "rapid"])
            }
            UseCase::Outdoor => {
                let candidate = any(&name, &["asa", "abs", "petg"])
                    || use_cases.contains("outdoor")
                    || notes.contains("weather");
                let limited_uv = notes.contains("limited") && notes.contains("uv");
                let low_uv = filament.spec_text("uv_resistance") == Some("Low");
                candidate && !limited_uv && !low_uv
            }
        }
    }
}

fn any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Physical handling requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Requirement {
    Enclosure,
    HardenedNozzle,
    Hygroscopic,
}

static ENCLOSURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)enclosure").expect("valid regex"));
static HARDENED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)hardened").expect("valid regex"));
static MOISTURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)moisture").expect("valid regex"));

impl Requirement {
    pub const ALL: [Requirement; 3] = [
        Requirement::Enclosure,
        Requirement::HardenedNozzle,
        Requirement::Hygroscopic,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Requirement::Enclosure => "enclosure",
            Requirement::HardenedNozzle => "hardened",
            Requirement::Hygroscopic => "hygro",
        }
    }

    /// Boolean flag or a matching raw badge
    pub fn matches(&self, filament: &Filament) -> bool {
        let badge = |re: &Regex| filament.badges.iter().any(|b| re.is_match(b));
        match self {
            Requirement::Enclosure => filament.enclosure || badge(&*ENCLOSURE),
            Requirement::HardenedNozzle => badge(&*HARDENED),
            Requirement::Hygroscopic => filament.hygroscopic || badge(&*MOISTURE),
        }
    }
}
