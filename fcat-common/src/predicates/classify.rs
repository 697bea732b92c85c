//! Single-valued classifiers: material type, difficulty, price range
//!
//! Each classifier maps a filament onto exactly one bucket; the filter
//! engine's material/difficulty/price groups test membership of that bucket.

use serde::{Deserialize, Serialize};

use crate::model::Filament;

/// Material family derived from the filament name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    Pla,
    Petg,
    Abs,
    Tpu,
    Nylon,
    Other,
}

impl MaterialType {
    pub const ALL: [MaterialType; 6] = [
        MaterialType::Pla,
        MaterialType::Petg,
        MaterialType::Abs,
        MaterialType::Tpu,
        MaterialType::Nylon,
        MaterialType::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MaterialType::Pla => "pla",
            MaterialType::Petg => "petg",
            MaterialType::Abs => "abs",
            MaterialType::Tpu => "tpu",
            MaterialType::Nylon => "nylon",
            MaterialType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaterialType::Pla => "PLA",
            MaterialType::Petg => "PETG",
            MaterialType::Abs => "ABS",
            MaterialType::Tpu => "TPU",
            MaterialType::Nylon => "Nylon",
            MaterialType::Other => "Other",
        }
    }

    /// Classify by lowercased name, first match wins
    ///
    /// The order is literal: "PETG" never reaches the `petg` test if the
    /// name also mentions PLA, and "Carbon Fiber Nylon PA-6" is Nylon only
    /// because of the word "nylon" ("pa-6" is not "pa6").
    pub fn of(filament: &Filament) -> MaterialType {
        let name = filament.name.to_lowercase();
        if name.contains("pla") {
            MaterialType::Pla
        } else if name.contains("petg") {
            MaterialType::Petg
        } else if name.contains("abs") {
            MaterialType::Abs
        } else if name.contains("tpu") {
            MaterialType::Tpu
        } else if name.contains("nylon") || name.contains("pa6") || name.contains("pa12") {
            MaterialType::Nylon
        } else {
            MaterialType::Other
        }
    }
}

/// Printing difficulty derived from `specs.ease_of_printing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Intermediate is the default bucket, including for a missing spec
    pub fn of(filament: &Filament) -> Difficulty {
        let Some(ease) = filament.spec_text("ease_of_printing") else {
            return Difficulty::Intermediate;
        };
        let ease = ease.to_lowercase();
        if ease.contains("very high") || ease.contains("beginner") {
            Difficulty::Beginner
        } else if ease.contains("very low") || ease.contains("expert") || ease.contains("very difficult") {
            Difficulty::Advanced
        } else {
            Difficulty::Intermediate
        }
    }
}

/// Price bracket derived from `specs.price_range`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    Budget,
    Midrange,
    Premium,
}

impl PriceRange {
    pub const ALL: [PriceRange; 3] = [PriceRange::Budget, PriceRange::Midrange, PriceRange::Premium];

    pub fn key(&self) -> &'static str {
        match self {
            PriceRange::Budget => "budget",
            PriceRange::Midrange => "midrange",
            PriceRange::Premium => "premium",
        }
    }

    /// Midrange is the default bucket, including for a missing spec
    pub fn of(filament: &Filament) -> PriceRange {
        let Some(price) = filament.spec_text("price_range") else {
            return PriceRange::Midrange;
        };
        let price = price.to_lowercase();
        if price.contains("budget") {
            PriceRange::Budget
        } else if price.contains("premium") {
            PriceRange::Premium
        } else {
            PriceRange::Midrange
        }
    }
}
