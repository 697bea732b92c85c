//! Badge canonicalization
//!
//! Dataset badges are free text and overlap with the `enclosure` /
//! `hygroscopic` flags ("Needs enclosure", "Enclosure recommended", ...).
//! Labels are folded onto a small set of canonical phrases by an ordered,
//! first-match-wins rule table. Labels no rule matches pass through verbatim;
//! extending the table is a content decision.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Filament;

pub const PREFERS_ENCLOSURE: &str = "Prefers enclosure";
pub const REQUIRES_HARDENED_NOZZLE: &str = "Requires hardened nozzle";
pub const MOISTURE_SENSITIVE: &str = "Moisture sensitive";
pub const AESTHETIC: &str = "Aesthetic";

/// Ordered (pattern, canonical label) rules
static CANONICAL_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)enclosure", PREFERS_ENCLOSURE),
        (r"(?i)hardened", REQUIRES_HARDENED_NOZZLE),
        (r"(?i)moisture", MOISTURE_SENSITIVE),
        (r"(?i)aesthetic", AESTHETIC),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).expect("valid regex"), label))
    .collect()
});

/// Canonical form of a badge label
pub fn canonical_badge(label: &str) -> String {
    let trimmed = label.trim();
    CANONICAL_RULES
        .iter()
        .find(|(re, _)| re.is_match(trimmed))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| label.to_string())
}

/// Badges to display for a filament
///
/// Canonicalized dataset badges de-duplicated in first-seen order, followed
/// by the badges implied by the `enclosure` and `hygroscopic` flags when not
/// already present.
pub fn display_badges(filament: &Filament) -> Vec<String> {
    let mut badges: Vec<String> = Vec::new();
    let mut push = |label: String| {
        if !badges.contains(&label) {
            badges.push(label);
        }
    };

    for badge in &filament.badges {
        push(canonical_badge(badge));
    }
    if filament.enclosure {
        push(PREFERS_ENCLOSURE.to_string());
    }
    if filament.hygroscopic {
        push(MOISTURE_SENSITIVE.to_string());
    }

    badges
}

/// Style class for a badge label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    Enclosure,
    Hardened,
    Hygro,
    Aesthetic,
}

impl BadgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeClass::Enclosure => "enclosure",
            BadgeClass::Hardened => "hardened",
            BadgeClass::Hygro => "hygro",
            BadgeClass::Aesthetic => "aesthetic",
        }
    }
}

/// Style classes of a badge (a label may carry several)
pub fn badge_classes(label: &str) -> Vec<BadgeClass> {
    let lower = label.to_lowercase();
    [
        ("enclosure", BadgeClass::Enclosure),
        ("hardened", BadgeClass::Hardened),
        ("moisture", BadgeClass::Hygro),
        ("aesthetic", BadgeClass::Aesthetic),
    ]
    .into_iter()
    .filter(|(needle, _)| lower.contains(needle))
    .map(|(_, class)| class)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tier;

    #[test]
    fn test_canonical_badge_rules() {
        assert_eq!(canonical_badge("Enclosure recommended"), PREFERS_ENCLOSURE);
        assert_eq!(canonical_badge("  needs HARDENED steel nozzle "), REQUIRES_HARDENED_NOZZLE);
        assert_eq!(canonical_badge("Dry before use (moisture)"), MOISTURE_SENSITIVE);
        assert_eq!(canonical_badge("aesthetic finish"), AESTHETIC);
    }

    #[test]
    fn test_canonical_badge_first_rule_wins() {
        // Mentions both enclosure and moisture; enclosure is tested first
        assert_eq!(canonical_badge("Enclosure + moisture control"), PREFERS_ENCLOSURE);
    }

    #[test]
    fn test_unmatched_badge_passes_through_verbatim() {
        assert_eq!(canonical_badge(" Food contact "), " Food contact ");
    }

    #[test]
    fn test_display_badges_deduplicates_and_adds_flags() {
        let mut f = Filament::new("ABS", Tier::C);
        f.badges = vec![
            "Enclosure recommended".to_string(),
            "Prefers enclosure".to_string(),
            "Strong".to_string(),
        ];
        f.enclosure = true;
        f.hygroscopic = true;

        assert_eq!(
            display_badges(&f),
            vec![
                PREFERS_ENCLOSURE.to_string(),
                "Strong".to_string(),
                MOISTURE_SENSITIVE.to_string(),
            ]
        );
    }

    #[test]
    fn test_badge_classes() {
        assert_eq!(badge_classes("Prefers enclosure"), vec![BadgeClass::Enclosure]);
        assert_eq!(badge_classes("Moisture sensitive"), vec![BadgeClass::Hygro]);
        assert!(badge_classes("Strong").is_empty());
    }
}
