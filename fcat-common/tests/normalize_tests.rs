//! Integration tests for the spec normalizer and radar chart scores

use fcat_common::charts::{radar_scores, Chart};
use fcat_common::dataset::embedded_catalog;
use fcat_common::normalize::{normalize_spec_value, normalize_text};
use serde_json::json;

const SCORED_KEYS: &[&str] = &[
    "warping",
    "temperature_resistance",
    "flexibility",
    "tensile_strength",
    "impact_resistance",
    "chemical_resistance",
    "uv_resistance",
    "print_speed",
    "layer_adhesion",
    "surface_quality",
    "cost_effectiveness",
    "post_processing",
    "ease_of_printing",
];

#[test]
fn test_unmatched_text_is_neutral_for_every_category() {
    for key in SCORED_KEYS {
        assert_eq!(normalize_text("n/a - untested", key), 0.5, "{}", key);
    }
    assert_eq!(normalize_text("Very High", "dimensional_accuracy"), 0.5);
}

#[test]
fn test_non_string_is_zero_for_every_category() {
    for key in SCORED_KEYS {
        assert_eq!(normalize_spec_value(None, key), 0.0);
        assert_eq!(normalize_spec_value(Some(&json!(null)), key), 0.0);
        assert_eq!(normalize_spec_value(Some(&json!(130)), key), 0.0);
        assert_eq!(normalize_spec_value(Some(&json!(true)), key), 0.0);
    }
}

#[test]
fn test_reference_values() {
    assert_eq!(normalize_text("Very High Flexibility", "flexibility"), 1.0);
    assert_eq!(normalize_text("130°C (continuous use)", "temperature_resistance"), 0.325);
    assert_eq!(normalize_text("500°C", "temperature_resistance"), 1.0);
    assert_eq!(normalize_text("Very High", "warping"), 0.2);
    assert_eq!(normalize_text("Mirror finish", "surface_quality"), 1.0);
    assert_eq!(normalize_text("Forgiving", "ease_of_printing"), 0.8);
}

#[test]
fn test_embedded_dataset_scores_are_bounded() {
    let catalog = embedded_catalog().unwrap();
    for filament in &catalog {
        for chart in Chart::ALL {
            let Some(scores) = radar_scores(filament, chart) else {
                continue;
            };
            assert_eq!(scores.len(), 6);
            for score in scores {
                assert!(
                    (0.0..=1.0).contains(&score.score),
                    "{} / {} = {}",
                    filament.name,
                    score.key,
                    score.score
                );
            }
        }
    }
}
