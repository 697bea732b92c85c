//! Saved session state
//!
//! A [`StateStore`] keeps one JSON file per [`StateKey`] in a directory.
//! Storage is best effort: failures are logged and the caller carries on
//! with defaults, so a read-only or corrupt state directory never stops
//! browsing.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::write_atomic;
use crate::filter::{FilterGroup, FilterOption, FilterSelection};
use crate::session::{ComparisonSet, Session, UiState};
use crate::Result;

/// Stored state entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    Filters,
    Comparison,
    UiState,
    Search,
}

impl StateKey {
    pub const ALL: [StateKey; 4] = [
        StateKey::Filters,
        StateKey::Comparison,
        StateKey::UiState,
        StateKey::Search,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            StateKey::Filters => "filters.json",
            StateKey::Comparison => "comparison.json",
            StateKey::UiState => "ui_state.json",
            StateKey::Search => "search.json",
        }
    }
}

/// Snapshot of a [`FilterSelection`]
///
/// Options are stored by group key and option key so that a snapshot taken
/// by another build (with options added or removed) still restores: unknown
/// entries are skipped and missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilters {
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub groups: BTreeMap<String, BTreeMap<String, bool>>,
}

impl SavedFilters {
    pub fn capture(selection: &FilterSelection) -> Self {
        let groups = FilterGroup::ALL
            .iter()
            .map(|group| {
                let options = group
                    .options()
                    .into_iter()
                    .map(|o| (o.key().to_string(), selection.is_checked(&o)))
                    .collect();
                (group.key().to_string(), options)
            })
            .collect();

        Self {
            saved_at: Utc::now(),
            search: selection.search.clone(),
            groups,
        }
    }

    pub fn restore(&self) -> FilterSelection {
        let mut selection = FilterSelection::default().with_search(self.search.clone());

        for (group_key, options) in &self.groups {
            let Some(group) = FilterGroup::from_key(group_key) else {
                debug!("Skipping unknown saved filter group '{}'", group_key);
                continue;
            };
            for (option_key, checked) in options {
                match FilterOption::parse(group, option_key) {
                    Some(option) => selection.set(option, *checked),
                    None => debug!("Skipping unknown saved filter '{}:{}'", group_key, option_key),
                }
            }
        }
        selection
    }
}

/// Directory-backed key/value store for session state
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, key: StateKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn try_save<T: Serialize>(&self, key: StateKey, value: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        write_atomic(&self.path(key), &json)
    }

    /// Store a value; failures are logged and otherwise ignored
    pub fn save<T: Serialize>(&self, key: StateKey, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!("Failed to save {}: {}", key.file_name(), e);
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: StateKey) -> Result<Option<T>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Stored value, or `default` when missing or unreadable
    pub fn load<T: DeserializeOwned>(&self, key: StateKey, default: T) -> T {
        self.load_opt(key).unwrap_or(default)
    }

    /// Stored value, `None` when missing or unreadable
    pub fn load_opt<T: DeserializeOwned>(&self, key: StateKey) -> Option<T> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to load {}: {}", key.file_name(), e);
                None
            }
        }
    }

    /// Remove every stored entry
    pub fn clear(&self) {
        for key in StateKey::ALL {
            let path = self.path(key);
            if !path.exists() {
                continue;
            }
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to clear {}: {}", key.file_name(), e);
            }
        }
    }

    /// Persist the session's filters, comparison set and UI state
    pub fn save_session(&self, session: &Session) {
        self.save(StateKey::Filters, &SavedFilters::capture(&session.filters));
        self.save(StateKey::Search, &session.filters.search);
        self.save(StateKey::Comparison, session.comparison());
        self.save(StateKey::UiState, &session.ui);
        debug!("Saved session state to {}", self.dir.display());
    }

    /// Apply stored state to a fresh session
    ///
    /// Comparison entries naming filaments absent from the catalog are
    /// dropped.
    pub fn restore_session(&self, session: &mut Session) {
        match self.load_opt::<SavedFilters>(StateKey::Filters) {
            Some(saved) => {
                info!("Restoring filters saved at {}", saved.saved_at.to_rfc3339());
                session.filters = saved.restore();
            }
            None => {
                if let Some(search) = self.load_opt::<String>(StateKey::Search) {
                    session.filters.search = search;
                }
            }
        }
        session.restore_comparison(self.load(StateKey::Comparison, ComparisonSet::new()));
        session.ui = self.load(StateKey::UiState, UiState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{MaterialType, SpecFlag};

    #[test]
    fn test_capture_restore() {
        let selection = FilterSelection::default()
            .with_search("carbon")
            .without(&FilterOption::Material(MaterialType::Abs))
            .with(FilterOption::Spec(SpecFlag::LowWarping));

        let saved = SavedFilters::capture(&selection);
        assert!(!saved.groups["material"]["abs"]);
        assert!(saved.groups["specs"]["low-warping"]);
        assert_eq!(saved.restore(), selection);
    }

    #[test]
    fn test_restore_skips_unknown_entries() {
        let mut groups = BTreeMap::new();
        groups.insert("colour".to_string(), BTreeMap::from([("red".to_string(), true)]));
        groups.insert(
            "material".to_string(),
            BTreeMap::from([("resin".to_string(), true), ("pla".to_string(), false)]),
        );
        let saved = SavedFilters {
            saved_at: Utc::now(),
            search: String::new(),
            groups,
        };

        let restored = saved.restore();
        let expected = FilterSelection::default().without(&FilterOption::Material(MaterialType::Pla));
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_snapshot_without_timestamp_still_restores() {
        let saved: SavedFilters =
            serde_json::from_str(r#"{"search":"pla","groups":{"tier":{"S":false}}}"#).unwrap();
        let restored = saved.restore();
        assert_eq!(restored.search, "pla");
        assert!(!restored.is_checked(&FilterOption::Tier(crate::model::Tier::S)));
        assert!(restored.is_checked(&FilterOption::Tier(crate::model::Tier::A)));
    }
}
