//! Name-list driven predicates: professional equipment, popular materials,
//! review video categories
//!
//! Name tests here are case-sensitive substring tests against the dataset's
//! naming, except video categories, which require exact name equality.

use serde::{Deserialize, Serialize};

use crate::model::Filament;

/// Materials that need specialist printers
const PROFESSIONAL_NAMES: &[&str] = &[
    "PEEK",
    "PPS",
    "TPI (Kapton)",
    "HDPE",
    "POM (Acetal/Delrin)",
    "PVDF",
    "Carbon Fiber PEEK (CF PEEK)",
    "PPSU",
    "PEKK",
    "SEBS",
    "PSU (Polysulfone)",
    "OBC (Olefin Block Copolymer)",
];

/// Nozzle temperature markers beyond consumer hotends
const EXTREME_TEMPERATURES: &[&str] = &["~400°C", "~450°C", "~325°C"];

const PROFESSIONAL_USE_CASES: &[&str] = &[
    "specialized",
    "industrial",
    "professional",
    "specialized equipment",
    "advanced printer",
];

const PROFESSIONAL_NOTES: &[&str] = &[
    "specialized equipment",
    "professional printer",
    "industrial printer",
    "extreme temps",
    "advanced setup",
];

/// Whether printing the filament calls for professional equipment
///
/// Any one of four independent heuristics is enough: a known specialist
/// material name, an extreme nozzle temperature, professional wording in the
/// use cases or notes, or `specs.availability` being exactly "Rare".
pub fn requires_professional_equipment(filament: &Filament) -> bool {
    let name = filament.name.as_str();
    let temp = filament.temp_text();
    let use_cases = filament.use_cases_text();
    let notes = filament.notes_text();

    PROFESSIONAL_NAMES.iter().any(|n| name.contains(n))
        || EXTREME_TEMPERATURES.iter().any(|t| temp.contains(t))
        || PROFESSIONAL_USE_CASES.iter().any(|k| use_cases.contains(k))
        || PROFESSIONAL_NOTES.iter().any(|k| notes.contains(k))
        || filament.spec_text("availability") == Some("Rare")
}

/// Core materials covering most real-world use
const POPULAR_CORE: &[&str] = &["PLA", "PETG", "ABS", "TPU", "ASA", "Nylon", "PCTG"];

/// Variant markers that disqualify an otherwise popular material
const SPECIALIZED_VARIANTS: &[&str] = &[
    "Carbon Fiber",
    "Glass Filled",
    "Metal Filled",
    "Conductive",
    "Magnetic",
    "Glow",
    "Color-Changing",
    "Wood",
    "Marble",
    "Silk",
    "Matte",
    "Transparent",
    "Clear",
];

/// Whether the filament is a plain variant of a popular core material
///
/// Deliberately restrictive: anything outside the core list is excluded, and
/// so is any specialized variant of a core material.
pub fn is_popular_material(filament: &Filament) -> bool {
    let name = filament.name.as_str();
    POPULAR_CORE.iter().any(|m| name.contains(m))
        && !SPECIALIZED_VARIANTS.iter().any(|v| name.contains(v))
}

/// Tier of a filament in the filament review video's ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VideoTier {
    S,
    A,
    B,
    C,
    F,
}

impl VideoTier {
    pub const ALL: [VideoTier; 5] = [VideoTier::S, VideoTier::A, VideoTier::B, VideoTier::C, VideoTier::F];

    pub fn key(&self) -> &'static str {
        match self {
            VideoTier::S => "s",
            VideoTier::A => "a",
            VideoTier::B => "b",
            VideoTier::C => "c",
            VideoTier::F => "f",
        }
    }

    /// Exact filament names ranked in this tier
    pub fn members(&self) -> &'static [&'static str] {
        match self {
            VideoTier::S => &[
                "Carbon Fiber PLA (CFPLA)",
                "Tough PLA",
                "High-Speed PLA",
                "Carbon Fiber PETG (CF PETG)",
                "PCTG",
                "Glass-Filled Nylon (GF Nylon)",
                "TPU 99D",
            ],
            VideoTier::A => &[
                "PLA",
                "PETG",
                "Carbon Fiber PET (CF PET)",
                "ASA",
                "Carbon Fiber PC (CF PC)",
                "PC PBT (Polycarbonate/PBT blend)",
                "SEBS",
                "PEKK",
                "Ultem (PEI)",
            ],
            VideoTier::B => &[
                "Silk PLA",
                "Wood PLA",
                "Matte PLA",
                "Flex PLA (PCL)",
                "PET (Bottle-grade)",
                "PVB",
                "HIPS",
                "PA6 Nylon",
                "Nylon PA-12",
                "Carbon Fiber Nylon PA-6 (CF Nylon PA-6)",
                "Polycarbonate (PC)",
                "TPU 80D",
                "Glass-Filled PP (GF PP)",
                "PSU (Polysulfone)",
            ],
            VideoTier::C => &[
                "ABS",
                "Carbon Fiber Nylon PA-12 (CF Nylon PA-12)",
                "Nylon/PETG Alloys",
                "Clear PMMA",
                "Chocolate (Disqualified)",
                "TPU 80C",
                "OBC (Olefin Block Copolymer)",
                "PEEK",
                "PPS",
                "PES",
                "PPSU",
                "Carbon Fiber PEEK (CF PEEK)",
            ],
            VideoTier::F => &[
                "5x Metal-Filled PLA",
                "Non-clear PMMA",
                "TPE",
                "Polypropylene (PP)",
                "HDPE",
                "POM (Acetal/Delrin)",
                "PVDF",
                "TPI (Kapton)",
            ],
        }
    }

    /// Exact-name membership; "PLA Plus" is not "PLA"
    pub fn contains(&self, filament: &Filament) -> bool {
        self.members().iter().any(|name| *name == filament.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Specs, Tier};

    fn named(name: &str) -> Filament {
        Filament::new(name, Tier::B)
    }

    #[test]
    fn test_professional_by_name() {
        assert!(requires_professional_equipment(&named("PEEK")));
        assert!(requires_professional_equipment(&named("Glass-Filled PPS")));
        // Case-sensitive: "peek" in lowercase prose does not count
        assert!(!requires_professional_equipment(&named("Sneak peek PLA")));
    }

    #[test]
    fn test_professional_by_temperature_and_text() {
        let mut f = named("Ultem (PEI)");
        f.temp = Some("~400°C".to_string());
        assert!(requires_professional_equipment(&f));

        let mut f = named("Mystery");
        f.use_cases = Some("aerospace, industrial tooling".to_string());
        assert!(requires_professional_equipment(&f));

        let mut f = named("Mystery");
        f.notes = Some("Needs an industrial printer".to_string());
        assert!(requires_professional_equipment(&f));
    }

    #[test]
    fn test_professional_by_rare_availability() {
        let mut f = named("Mystery");
        let mut specs = Specs::new();
        specs.insert("availability", "Rare");
        f.specs = Some(specs);
        assert!(requires_professional_equipment(&f));

        let mut specs = Specs::new();
        specs.insert("availability", "Rare (online only)");
        f.specs = Some(specs);
        assert!(!requires_professional_equipment(&f));
    }

    #[test]
    fn test_popular_material_exclusions() {
        assert!(is_popular_material(&named("PLA")));
        assert!(is_popular_material(&named("Tough PLA")));
        assert!(is_popular_material(&named("PCTG")));
        assert!(!is_popular_material(&named("Carbon Fiber PLA")));
        assert!(!is_popular_material(&named("Silk PLA")));
        assert!(!is_popular_material(&named("PEEK")));
    }

    #[test]
    fn test_video_category_exact_match() {
        assert!(VideoTier::A.contains(&named("PLA")));
        assert!(!VideoTier::A.contains(&named("PLA Plus")));
        assert!(!VideoTier::A.contains(&named("pla")));
        assert!(VideoTier::F.contains(&named("TPI (Kapton)")));
    }
}
