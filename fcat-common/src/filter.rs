//! Filter engine
//!
//! Evaluates a declarative [`FilterSelection`] against the catalog.
//!
//! # Semantics
//! - The tier group is mandatory: a filament must carry one of the checked
//!   tiers, so checking no tier at all matches nothing.
//! - Free-text search (trimmed, case-insensitive) is a plain substring test
//!   over name, notes, use cases, badges and spec values.
//! - Every other group is an OR over its checked options. A group with no
//!   checked option imposes no constraint.
//! - Groups combine with AND.
//!
//! The engine is stateless and re-evaluated in full for every input change.
//! Results keep the catalog's relative order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::model::{Filament, Tier};
use crate::predicates::{
    is_popular_material, requires_professional_equipment, Difficulty, MaterialType, PriceRange,
    Requirement, SpecFlag, UseCase, VideoTier,
};
use crate::{Error, Result};

/// Named cluster of OR-combined filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterGroup {
    Tier,
    Material,
    Difficulty,
    Price,
    Requirements,
    UseCase,
    Specs,
    Video,
    Other,
}

impl FilterGroup {
    pub const ALL: [FilterGroup; 9] = [
        FilterGroup::Tier,
        FilterGroup::Material,
        FilterGroup::Difficulty,
        FilterGroup::Price,
        FilterGroup::Requirements,
        FilterGroup::UseCase,
        FilterGroup::Specs,
        FilterGroup::Video,
        FilterGroup::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterGroup::Tier => "tier",
            FilterGroup::Material => "material",
            FilterGroup::Difficulty => "difficulty",
            FilterGroup::Price => "price",
            FilterGroup::Requirements => "requirements",
            FilterGroup::UseCase => "usecase",
            FilterGroup::Specs => "specs",
            FilterGroup::Video => "video",
            FilterGroup::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterGroup::Tier => "Quality Tier",
            FilterGroup::Material => "Material Type",
            FilterGroup::Difficulty => "Difficulty",
            FilterGroup::Price => "Price Range",
            FilterGroup::Requirements => "Requirements",
            FilterGroup::UseCase => "Use Case",
            FilterGroup::Specs => "Specifications",
            FilterGroup::Video => "Video Ranking",
            FilterGroup::Other => "Other",
        }
    }

    pub fn from_key(key: &str) -> Option<FilterGroup> {
        FilterGroup::ALL.into_iter().find(|g| g.key() == key)
    }

    /// An empty mandatory group matches nothing instead of everything
    pub fn is_mandatory(&self) -> bool {
        matches!(self, FilterGroup::Tier)
    }

    /// Every option of the group, in display order
    pub fn options(&self) -> Vec<FilterOption> {
        match self {
            FilterGroup::Tier => Tier::KNOWN.into_iter().map(FilterOption::Tier).collect(),
            FilterGroup::Material => MaterialType::ALL.into_iter().map(FilterOption::Material).collect(),
            FilterGroup::Difficulty => Difficulty::ALL.into_iter().map(FilterOption::Difficulty).collect(),
            FilterGroup::Price => PriceRange::ALL.into_iter().map(FilterOption::Price).collect(),
            FilterGroup::Requirements => Requirement::ALL.into_iter().map(FilterOption::Requirement).collect(),
            FilterGroup::UseCase => UseCase::ALL.into_iter().map(FilterOption::UseCase).collect(),
            FilterGroup::Specs => SpecFlag::ALL.into_iter().map(FilterOption::Spec).collect(),
            FilterGroup::Video => VideoTier::ALL.into_iter().map(FilterOption::Video).collect(),
            FilterGroup::Other => vec![FilterOption::ProfessionalOnly, FilterOption::PopularMaterials],
        }
    }
}

/// One checkbox of the filter panel
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterOption {
    Tier(Tier),
    Material(MaterialType),
    Difficulty(Difficulty),
    Price(PriceRange),
    Requirement(Requirement),
    UseCase(UseCase),
    Spec(SpecFlag),
    Video(VideoTier),
    ProfessionalOnly,
    PopularMaterials,
}

impl FilterOption {
    pub fn group(&self) -> FilterGroup {
        match self {
            FilterOption::Tier(_) => FilterGroup::Tier,
            FilterOption::Material(_) => FilterGroup::Material,
            FilterOption::Difficulty(_) => FilterGroup::Difficulty,
            FilterOption::Price(_) => FilterGroup::Price,
            FilterOption::Requirement(_) => FilterGroup::Requirements,
            FilterOption::UseCase(_) => FilterGroup::UseCase,
            FilterOption::Spec(_) => FilterGroup::Specs,
            FilterOption::Video(_) => FilterGroup::Video,
            FilterOption::ProfessionalOnly | FilterOption::PopularMaterials => FilterGroup::Other,
        }
    }

    /// Key of the option within its group
    pub fn key(&self) -> &str {
        match self {
            FilterOption::Tier(t) => t.as_str(),
            FilterOption::Material(m) => m.key(),
            FilterOption::Difficulty(d) => d.key(),
            FilterOption::Price(p) => p.key(),
            FilterOption::Requirement(r) => r.key(),
            FilterOption::UseCase(u) => u.key(),
            FilterOption::Spec(s) => s.key(),
            FilterOption::Video(v) => v.key(),
            FilterOption::ProfessionalOnly => "professional-only",
            FilterOption::PopularMaterials => "popular-materials",
        }
    }

    /// Checked state after a reset
    ///
    /// The tier, material, difficulty and price groups start fully checked;
    /// everything else starts unchecked.
    pub fn default_checked(&self) -> bool {
        matches!(
            self,
            FilterOption::Tier(_)
                | FilterOption::Material(_)
                | FilterOption::Difficulty(_)
                | FilterOption::Price(_)
        )
    }

    /// Option predicate
    pub fn matches(&self, filament: &Filament) -> bool {
        match self {
            FilterOption::Tier(tier) => filament.tier == *tier,
            FilterOption::Material(m) => MaterialType::of(filament) == *m,
            FilterOption::Difficulty(d) => Difficulty::of(filament) == *d,
            FilterOption::Price(p) => PriceRange::of(filament) == *p,
            FilterOption::Requirement(r) => r.matches(filament),
            FilterOption::UseCase(u) => u.matches(filament),
            FilterOption::Spec(s) => s.matches(filament),
            FilterOption::Video(v) => v.contains(filament),
            FilterOption::ProfessionalOnly => requires_professional_equipment(filament),
            FilterOption::PopularMaterials => is_popular_material(filament),
        }
    }

    /// Look up an option by group and key
    pub fn parse(group: FilterGroup, key: &str) -> Option<FilterOption> {
        group.options().into_iter().find(|o| o.key() == key)
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group().key(), self.key())
    }
}

/// Parses `group:key`, e.g. `material:pla`, `specs:low-warping`, `tier:S`
impl FromStr for FilterOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (group_key, option_key) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidInput(format!("Expected group:option, got '{}'", s)))?;
        let group = FilterGroup::from_key(group_key)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown filter group '{}'", group_key)))?;
        FilterOption::parse(group, option_key).ok_or_else(|| {
            Error::InvalidInput(format!("Unknown option '{}' in filter group '{}'", option_key, group_key))
        })
    }
}

/// Complete filter input: search text plus the set of checked options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub search: String,
    checked: BTreeSet<FilterOption>,
}

impl Default for FilterSelection {
    /// Reset state: default-checked options, empty search
    fn default() -> Self {
        let checked = FilterGroup::ALL
            .iter()
            .flat_map(|g| g.options())
            .filter(FilterOption::default_checked)
            .collect();
        Self {
            search: String::new(),
            checked,
        }
    }
}

impl FilterSelection {
    /// Selection with nothing checked (matches nothing: no tier is checked)
    pub fn empty() -> Self {
        Self {
            search: String::new(),
            checked: BTreeSet::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with(mut self, option: FilterOption) -> Self {
        self.checked.insert(option);
        self
    }

    pub fn without(mut self, option: &FilterOption) -> Self {
        self.checked.remove(option);
        self
    }

    pub fn is_checked(&self, option: &FilterOption) -> bool {
        self.checked.contains(option)
    }

    pub fn set(&mut self, option: FilterOption, checked: bool) {
        if checked {
            self.checked.insert(option);
        } else {
            self.checked.remove(&option);
        }
    }

    /// Uncheck every option of a group
    pub fn clear_group(&mut self, group: FilterGroup) {
        self.checked.retain(|o| o.group() != group);
    }

    pub fn checked(&self) -> impl Iterator<Item = &FilterOption> {
        self.checked.iter()
    }

    pub fn checked_in(&self, group: FilterGroup) -> Vec<&FilterOption> {
        self.checked.iter().filter(|o| o.group() == group).collect()
    }

    /// Number of checked options in a group (the count shown on its header)
    pub fn checked_count(&self, group: FilterGroup) -> usize {
        self.checked.iter().filter(|o| o.group() == group).count()
    }

    /// Whether a filament passes every active group and the search
    pub fn matches(&self, filament: &Filament) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !search_haystack(filament).contains(&needle) {
            return false;
        }

        FilterGroup::ALL.iter().all(|group| {
            let options = self.checked_in(*group);
            if options.is_empty() {
                return !group.is_mandatory();
            }
            options.iter().any(|o| o.matches(filament))
        })
    }
}

/// Lowercased text the free-text search runs against
pub fn search_haystack(filament: &Filament) -> String {
    let mut text = format!(
        "{} {} {} {}",
        filament.name,
        filament.notes_text(),
        filament.use_cases_text(),
        filament.badges.join(" ")
    );
    if let Some(specs) = &filament.specs {
        text.push(' ');
        text.push_str(&specs.joined_values());
    }
    text.to_lowercase()
}

/// Filaments passing the selection, in catalog order
///
/// # Examples
/// ```
/// use fcat_common::filter::{apply_filters, FilterSelection};
/// use fcat_common::model::{Filament, Tier};
///
/// let catalog = vec![Filament::new("PLA", Tier::A), Filament::new("PEEK", Tier::C)];
/// let visible = apply_filters(&catalog, &FilterSelection::default().with_search("pe"));
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].name, "PEEK");
///
/// assert!(apply_filters(&catalog, &FilterSelection::empty()).is_empty());
/// ```
pub fn apply_filters<'a>(filaments: &'a [Filament], selection: &FilterSelection) -> Vec<&'a Filament> {
    let visible: Vec<&Filament> = filaments.iter().filter(|f| selection.matches(f)).collect();
    debug!(
        "Filter pass: {} of {} filaments visible ({} options checked, search '{}')",
        visible.len(),
        filaments.len(),
        selection.checked.len(),
        selection.search.trim()
    );
    visible
}

/// Result count line, e.g. "Showing 1 filament" / "Showing 12 filaments"
pub fn results_summary(count: usize) -> String {
    format!("Showing {} filament{}", count, if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let s = FilterSelection::default();
        assert_eq!(s.checked_count(FilterGroup::Tier), 5);
        assert_eq!(s.checked_count(FilterGroup::Material), 6);
        assert_eq!(s.checked_count(FilterGroup::Difficulty), 3);
        assert_eq!(s.checked_count(FilterGroup::Price), 3);
        assert_eq!(s.checked_count(FilterGroup::Specs), 0);
        assert_eq!(s.checked_count(FilterGroup::Other), 0);
        assert!(s.search.is_empty());
    }

    #[test]
    fn test_option_keys_round_trip_through_display() {
        for group in FilterGroup::ALL {
            for option in group.options() {
                let parsed: FilterOption = option.to_string().parse().unwrap();
                assert_eq!(parsed, option);
            }
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!("material".parse::<FilterOption>().is_err());
        assert!("colour:red".parse::<FilterOption>().is_err());
        assert!("material:resin".parse::<FilterOption>().is_err());
        assert_eq!(
            "specs:low-warping".parse::<FilterOption>().unwrap(),
            FilterOption::Spec(SpecFlag::LowWarping)
        );
    }

    #[test]
    fn test_empty_tier_group_matches_nothing() {
        let f = Filament::new("PLA", Tier::A);
        let mut s = FilterSelection::default();
        s.clear_group(FilterGroup::Tier);
        assert!(!s.matches(&f));
    }

    #[test]
    fn test_empty_optional_group_is_no_constraint() {
        let f = Filament::new("PEEK", Tier::C);
        let mut s = FilterSelection::default();
        s.clear_group(FilterGroup::Material);
        assert!(s.matches(&f));
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let mut f = Filament::new("PETG", Tier::A);
        f.badges = vec!["Food contact".to_string()];
        assert!(FilterSelection::default().with_search("  FOOD ").matches(&f));
        assert!(!FilterSelection::default().with_search("nylon").matches(&f));
        assert!(FilterSelection::default().with_search("   ").matches(&f));
    }

    #[test]
    fn test_results_summary() {
        assert_eq!(results_summary(0), "Showing 0 filaments");
        assert_eq!(results_summary(1), "Showing 1 filament");
        assert_eq!(results_summary(7), "Showing 7 filaments");
    }
}
