//! Side-by-side comparison table
//!
//! Column order follows the slice handed in, which callers take from the
//! catalog so the table reads in catalog order.

use serde::Serialize;
use serde_json::Value;

use crate::badges::display_badges;
use crate::charts::{comparison_series, Chart, ChartSeries};
use crate::model::{Filament, Tier, COMPARISON_SPEC_FIELDS};
use crate::session::MIN_COMPARE;

/// Placeholder for empty or missing cells
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a filament without any flags
pub const NO_FLAGS: &str = "None";

/// Column header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonColumn {
    pub name: String,
    pub tier: Tier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Basic,
    Flags,
    Spec,
}

/// One labelled row, one value per column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub kind: RowKind,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub chart: Chart,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
    pub charts: Vec<ComparisonChart>,
}

impl ComparisonTable {
    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

fn or_na(text: &str) -> String {
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text.to_string()
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

/// Cell text for a spec value; falsy values (missing, null, "", 0, false)
/// show as N/A
fn spec_cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => or_na(s),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(v @ (Value::Array(_) | Value::Object(_))) => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn basic_row(label: &'static str, filaments: &[&Filament], cell: impl Fn(&Filament) -> String) -> ComparisonRow {
    ComparisonRow {
        label,
        kind: RowKind::Basic,
        values: filaments.iter().map(|f| cell(f)).collect(),
    }
}

/// Build the comparison for the selected filaments
///
/// Returns `None` for fewer than two filaments. Spec rows and charts are
/// included only when the first filament has specs.
pub fn build_comparison(filaments: &[&Filament]) -> Option<ComparisonTable> {
    if filaments.len() < MIN_COMPARE {
        return None;
    }

    let columns = filaments
        .iter()
        .map(|f| ComparisonColumn {
            name: f.name.clone(),
            tier: f.tier.clone(),
        })
        .collect();

    let mut rows = vec![
        basic_row("Nozzle Temp", filaments, |f| or_na(f.temp_text())),
        basic_row("Use Cases", filaments, |f| or_na(f.use_cases_text())),
        basic_row("Notes", filaments, |f| or_na(f.notes_text())),
        basic_row("Prefers Enclosure", filaments, |f| yes_no(f.enclosure)),
        basic_row("Moisture Sensitive", filaments, |f| yes_no(f.hygroscopic)),
    ];

    rows.push(ComparisonRow {
        label: "Flags",
        kind: RowKind::Flags,
        values: filaments
            .iter()
            .map(|f| {
                let badges = display_badges(f);
                if badges.is_empty() {
                    NO_FLAGS.to_string()
                } else {
                    badges.join(", ")
                }
            })
            .collect(),
    });

    let with_specs = filaments[0].specs.is_some();
    let mut charts = Vec::new();
    if with_specs {
        rows.extend(COMPARISON_SPEC_FIELDS.iter().map(|field| ComparisonRow {
            label: field.label,
            kind: RowKind::Spec,
            values: filaments.iter().map(|f| spec_cell(f.spec_value(field.key))).collect(),
        }));
        charts = Chart::ALL
            .into_iter()
            .map(|chart| ComparisonChart {
                chart,
                series: comparison_series(filaments, chart),
            })
            .collect();
    }

    Some(ComparisonTable { columns, rows, charts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Specs;
    use serde_json::json;

    fn with_specs(name: &str) -> Filament {
        let mut f = Filament::new(name, Tier::A);
        let mut specs = Specs::new();
        specs.insert("warping", "Low");
        specs.insert("density", json!(1.24));
        f.specs = Some(specs);
        f
    }

    #[test]
    fn test_needs_two_filaments() {
        let pla = Filament::new("PLA", Tier::A);
        assert!(build_comparison(&[]).is_none());
        assert!(build_comparison(&[&pla]).is_none());
    }

    #[test]
    fn test_basic_and_flag_rows() {
        let mut pla = Filament::new("PLA", Tier::A);
        pla.temp = Some("190-220°C".to_string());
        let mut nylon = Filament::new("Nylon", Tier::B);
        nylon.hygroscopic = true;
        nylon.badges = vec!["moisture".to_string()];

        let table = build_comparison(&[&pla, &nylon]).unwrap();
        assert_eq!(table.columns[1].name, "Nylon");
        assert_eq!(table.row("Nozzle Temp").unwrap().values, vec!["190-220°C", "N/A"]);
        assert_eq!(table.row("Moisture Sensitive").unwrap().values, vec!["No", "Yes"]);
        assert_eq!(table.row("Flags").unwrap().values, vec!["None", "Moisture sensitive"]);
        // First filament has no specs: no spec rows, no charts
        assert_eq!(table.rows.len(), 6);
        assert!(table.charts.is_empty());
    }

    #[test]
    fn test_spec_rows_follow_first_filament() {
        let a = with_specs("PETG");
        let b = Filament::new("Mystery", Tier::F);

        let table = build_comparison(&[&a, &b]).unwrap();
        assert_eq!(table.rows.len(), 6 + COMPARISON_SPEC_FIELDS.len());
        assert_eq!(table.row("Warping").unwrap().values, vec!["Low", "N/A"]);
        assert_eq!(table.row("Density").unwrap().values, vec!["1.24", "N/A"]);
        assert_eq!(table.charts.len(), 4);
        assert!(table.charts[0].series[1].scores.iter().all(|s| s.score == 0.0));
    }
}
