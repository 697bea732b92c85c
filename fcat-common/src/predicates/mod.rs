//! Domain predicate library
//!
//! Pure boolean checks and classifiers over a single filament. They are the
//! building blocks of the filter engine's option predicates.

pub mod catalog;
pub mod classify;
pub mod spec_flags;
pub mod use_case;

pub use catalog::{is_popular_material, requires_professional_equipment, VideoTier};
pub use classify::{Difficulty, MaterialType, PriceRange};
pub use spec_flags::SpecFlag;
pub use use_case::{Requirement, UseCase};
