//! Text rendering for the terminal front end

use fcat_common::badges::{badge_classes, display_badges};
use fcat_common::charts::{radar_scores, AxisScore, Chart};
use fcat_common::comparison::ComparisonTable;
use fcat_common::filter::{results_summary, FilterGroup, FilterSelection};
use fcat_common::session::{Session, UiState};
use fcat_common::Filament;
use serde_json::{json, Value};

/// Width of a score bar in characters
const BAR_WIDTH: usize = 10;

/// Score bar, e.g. `██████░░░░` for 0.6
pub fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// CLI formatter for catalog views
pub struct CliFormatter;

impl CliFormatter {
    /// One card: header, meta line, flags, notes; details when expanded
    pub fn format_card(filament: &Filament, compared: bool, expanded: bool) -> String {
        let mut output = String::new();

        let marker = if compared { "[x]" } else { "[ ]" };
        output.push_str(&format!("{} {}  ({})\n", marker, filament.name, filament.tier));
        output.push_str(&format!("    {}\n", filament.meta_line()));

        let badges = display_badges(filament);
        if !badges.is_empty() {
            output.push_str(&format!("    Flags: {}\n", badges.join(", ")));
        }
        if !filament.notes_text().is_empty() {
            output.push_str(&format!("    {}\n", filament.notes_text()));
        }

        if expanded {
            let details = filament.detail_specs();
            let width = details.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
            for (label, value) in details {
                output.push_str(&format!("      {:<width$}  {}\n", label, value, width = width));
            }
        }

        output
    }

    /// Visible cards followed by the result count
    pub fn format_list(session: &Session) -> String {
        let visible = session.visible();
        let mut output = String::new();

        for filament in &visible {
            output.push_str(&Self::format_card(
                filament,
                session.comparison().contains(&filament.name),
                session.ui.is_expanded(&filament.name),
            ));
            output.push('\n');
        }

        output.push_str(&results_summary(visible.len()));
        output.push_str(&format!("   {}\n", session.compare_label()));
        output
    }

    /// Cards as JSON, badges carrying their style classes
    pub fn list_json(session: &Session) -> Value {
        let cards: Vec<Value> = session
            .visible()
            .into_iter()
            .map(|f| {
                let badges: Vec<Value> = display_badges(f)
                    .into_iter()
                    .map(|label| {
                        let classes: Vec<&str> = badge_classes(&label).iter().map(|c| c.as_str()).collect();
                        json!({ "label": label, "classes": classes })
                    })
                    .collect();
                json!({
                    "name": f.name,
                    "tier": f.tier,
                    "meta": f.meta_line(),
                    "badges": badges,
                    "compared": session.comparison().contains(&f.name),
                })
            })
            .collect();

        json!({
            "summary": results_summary(cards.len()),
            "filaments": cards,
        })
    }

    /// One radar chart as labelled score bars, each followed by what the
    /// axis measures
    pub fn format_scores(chart: Chart, scores: &[AxisScore]) -> String {
        let mut output = format!("{}\n", chart.title());
        let width = scores.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
        for score in scores {
            output.push_str(&format!(
                "  {:<width$}  {}  {}\n",
                score.label,
                score_bar(score.score),
                score.tooltip(),
                width = width
            ));
            output.push_str(&format!("  {:<width$}  {}\n", "", score.description, width = width));
        }
        output
    }

    /// Every requested chart for one filament
    pub fn format_filament_scores(filament: &Filament, charts: &[Chart]) -> String {
        let mut output = String::new();
        for chart in charts {
            match radar_scores(filament, *chart) {
                Some(scores) => output.push_str(&Self::format_scores(*chart, &scores)),
                None => {
                    output.push_str(&format!("{}: no specification data\n", filament.name));
                    break;
                }
            }
        }
        output
    }

    /// Filter panel: group headers with checked counts, options of
    /// expanded groups
    pub fn format_filters(selection: &FilterSelection, ui: &UiState) -> String {
        let mut output = String::new();
        if !selection.search.trim().is_empty() {
            output.push_str(&format!("Search: \"{}\"\n", selection.search.trim()));
        }

        for group in FilterGroup::ALL {
            let collapsed = ui.is_collapsed(group);
            output.push_str(&format!(
                "{} {} ({})\n",
                if collapsed { "▸" } else { "▾" },
                group.label(),
                selection.checked_count(group)
            ));
            if collapsed {
                continue;
            }
            for option in group.options() {
                let mark = if selection.is_checked(&option) { "[x]" } else { "[ ]" };
                output.push_str(&format!("    {} {}\n", mark, option));
            }
        }
        output
    }

    /// Column-aligned comparison table plus chart series
    pub fn format_comparison(table: &ComparisonTable) -> String {
        let label_width = table
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .chain(std::iter::once("Property".len()))
            .max()
            .unwrap_or(0);

        let headers: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("{} ({})", c.name, c.tier))
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                table
                    .rows
                    .iter()
                    .map(|r| r.values[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = String::new();
        let render_line = |label: &str, cells: &[String]| {
            let mut line = format!("{:<width$}", label, width = label_width);
            for (cell, width) in cells.iter().zip(&widths) {
                line.push_str(&format!(" │ {:<width$}", cell, width = *width));
            }
            line.trim_end().to_string()
        };

        output.push_str(&render_line("Property", &headers));
        output.push('\n');
        let rule_len = label_width + widths.iter().map(|w| w + 3).sum::<usize>();
        output.push_str(&"─".repeat(rule_len));
        output.push('\n');
        for row in &table.rows {
            output.push_str(&render_line(row.label, &row.values));
            output.push('\n');
        }

        for chart in &table.charts {
            output.push('\n');
            output.push_str(&format!("{}\n", chart.chart.title()));
            for series in &chart.series {
                let percents: Vec<String> = series
                    .scores
                    .iter()
                    .map(|s| format!("{} {:.0}%", s.label, s.percent()))
                    .collect();
                output.push_str(&format!("  {}: {}\n", series.filament, percents.join(", ")));
            }
        }

        output
    }
}
