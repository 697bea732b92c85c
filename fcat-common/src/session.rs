//! Session state
//!
//! One [`Session`] owns everything a browsing session mutates: the filter
//! selection, the comparison set and the UI state. The catalog itself is
//! loaded once and never changes. Every operation takes the session
//! explicitly; there is no process-wide state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::filter::{apply_filters, FilterGroup, FilterSelection};
use crate::model::{find_by_name, Filament};
use crate::{Error, Result};

/// Minimum number of filaments for a side-by-side comparison
pub const MIN_COMPARE: usize = 2;

/// Names of the filaments selected for comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonSet(BTreeSet<String>);

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ComparisonSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ComparisonSet(iter.into_iter().map(Into::into).collect())
    }
}

/// Collapsed filter groups and expanded card details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiState {
    pub collapsed_groups: BTreeSet<FilterGroup>,
    pub expanded_details: BTreeSet<String>,
}

impl Default for UiState {
    /// Every filter group starts collapsed, no card details open
    fn default() -> Self {
        Self {
            collapsed_groups: FilterGroup::ALL.into_iter().collect(),
            expanded_details: BTreeSet::new(),
        }
    }
}

impl UiState {
    pub fn is_collapsed(&self, group: FilterGroup) -> bool {
        self.collapsed_groups.contains(&group)
    }

    /// Flip a group's collapsed state; returns the new state
    pub fn toggle_group(&mut self, group: FilterGroup) -> bool {
        if self.collapsed_groups.remove(&group) {
            false
        } else {
            self.collapsed_groups.insert(group);
            true
        }
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded_details.contains(name)
    }

    /// Flip a card's detail visibility; returns the new state
    pub fn toggle_details(&mut self, name: &str) -> bool {
        if self.expanded_details.remove(name) {
            false
        } else {
            self.expanded_details.insert(name.to_string());
            true
        }
    }
}

/// A browsing session over one loaded catalog
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Vec<Filament>,
    pub filters: FilterSelection,
    comparison: ComparisonSet,
    pub ui: UiState,
}

impl Session {
    /// Fresh session in the reset state
    pub fn new(catalog: Vec<Filament>) -> Self {
        Self {
            catalog,
            filters: FilterSelection::default(),
            comparison: ComparisonSet::new(),
            ui: UiState::default(),
        }
    }

    pub fn catalog(&self) -> &[Filament] {
        &self.catalog
    }

    /// Filaments passing the current filters, in catalog order
    pub fn visible(&self) -> Vec<&Filament> {
        apply_filters(&self.catalog, &self.filters)
    }

    pub fn find(&self, name: &str) -> Result<&Filament> {
        find_by_name(&self.catalog, name).ok_or_else(|| Error::NotFound(format!("Filament '{}'", name)))
    }

    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    /// Add or remove a filament from the comparison set
    ///
    /// Selecting a name that is not in the catalog is an error; deselecting
    /// one is a no-op.
    pub fn toggle_comparison(&mut self, name: &str, selected: bool) -> Result<()> {
        if selected {
            self.find(name)?;
            self.comparison.insert(name);
        } else {
            self.comparison.remove(name);
        }
        debug!("Comparison set now holds {} filament(s)", self.comparison.len());
        Ok(())
    }

    pub fn clear_comparison(&mut self) {
        self.comparison.clear();
    }

    /// Replace the comparison set, dropping names the catalog doesn't know
    pub fn restore_comparison(&mut self, saved: ComparisonSet) {
        self.comparison = saved
            .names()
            .filter(|name| find_by_name(&self.catalog, name).is_some())
            .collect();
    }

    /// Selected filaments in catalog order
    pub fn compared(&self) -> Vec<&Filament> {
        self.catalog
            .iter()
            .filter(|f| self.comparison.contains(&f.name))
            .collect()
    }

    /// Back to defaults: default filters, empty search, empty comparison,
    /// every group collapsed
    pub fn reset(&mut self) {
        self.filters = FilterSelection::default();
        self.comparison.clear();
        self.ui = UiState::default();
    }

    /// Compare button label, e.g. "Compare (3)"
    pub fn compare_label(&self) -> String {
        format!("Compare ({})", self.comparison.len())
    }

    pub fn can_compare(&self) -> bool {
        self.comparison.len() >= MIN_COMPARE
    }

    pub fn can_clear(&self) -> bool {
        !self.comparison.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOption;
    use crate::model::Tier;
    use crate::predicates::MaterialType;

    fn session() -> Session {
        Session::new(vec![
            Filament::new("PLA", Tier::A),
            Filament::new("PETG", Tier::A),
            Filament::new("ABS", Tier::C),
        ])
    }

    #[test]
    fn test_partial_ui_state_keeps_default_collapse() {
        let ui: UiState = serde_json::from_str(r#"{"expanded_details":["PLA"]}"#).unwrap();
        assert_eq!(ui.collapsed_groups.len(), FilterGroup::ALL.len());
        assert!(ui.is_expanded("PLA"));
        assert_eq!(serde_json::from_str::<UiState>("{}").unwrap(), UiState::default());
    }

    #[test]
    fn test_compare_controls() {
        let mut s = session();
        assert_eq!(s.compare_label(), "Compare (0)");
        assert!(!s.can_compare());
        assert!(!s.can_clear());

        s.toggle_comparison("ABS", true).unwrap();
        assert_eq!(s.compare_label(), "Compare (1)");
        assert!(!s.can_compare());
        assert!(s.can_clear());

        s.toggle_comparison("PLA", true).unwrap();
        assert!(s.can_compare());
        let names: Vec<_> = s.compared().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["PLA", "ABS"]);
    }

    #[test]
    fn test_toggle_unknown_name() {
        let mut s = session();
        assert!(matches!(s.toggle_comparison("PEEK", true), Err(Error::NotFound(_))));
        assert!(s.toggle_comparison("PEEK", false).is_ok());
        assert!(s.comparison().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut s = session();
        s.filters.search = "abs".to_string();
        s.filters.set(FilterOption::Material(MaterialType::Pla), false);
        s.toggle_comparison("PLA", true).unwrap();
        s.ui.toggle_group(FilterGroup::Specs);
        s.ui.toggle_details("PLA");

        s.reset();
        assert_eq!(s.filters, FilterSelection::default());
        assert!(s.comparison().is_empty());
        assert_eq!(s.ui, UiState::default());
        assert!(s.ui.is_collapsed(FilterGroup::Specs));
        assert_eq!(s.visible().len(), 3);
    }

    #[test]
    fn test_restore_comparison_drops_unknown_names() {
        let mut s = session();
        s.restore_comparison(["PLA", "Gone", "ABS"].into_iter().collect());
        assert_eq!(s.comparison().len(), 2);
        assert!(!s.comparison().contains("Gone"));
    }

    #[test]
    fn test_ui_toggles() {
        let mut ui = UiState::default();
        assert!(!ui.toggle_group(FilterGroup::Tier));
        assert!(!ui.is_collapsed(FilterGroup::Tier));
        assert!(ui.toggle_group(FilterGroup::Tier));
        assert!(ui.toggle_details("PLA"));
        assert!(ui.is_expanded("PLA"));
    }
}
