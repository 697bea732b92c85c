//! Command-line interface and command execution

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fcat_common::charts::Chart;
use fcat_common::comparison::build_comparison;
use fcat_common::filter::{FilterGroup, FilterOption};
use fcat_common::session::{Session, MIN_COMPARE};
use std::path::PathBuf;
use tracing::debug;

use crate::format::CliFormatter;

/// Browse, filter and compare 3D-printing filaments
#[derive(Parser, Debug)]
#[command(name = "fcat")]
#[command(about = "Filament catalog: filter, score and compare 3D-printing filaments")]
#[command(version)]
pub struct Cli {
    /// Dataset URL, JSON file path or `embedded`
    #[arg(long, global = true, value_name = "SOURCE")]
    pub dataset: Option<String>,

    /// Directory for saved filters, comparison set and view state
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Print JSON instead of text (list, show, compare)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List filaments passing the saved filters
    List {
        /// Replace the saved search text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one filament with its details and every radar chart
    Show { name: String },
    /// Radar chart scores for one filament
    Scores {
        name: String,
        /// Only this chart
        #[arg(long, value_enum)]
        chart: Option<ChartArg>,
    },
    /// Toggle a card's detail view in list output
    Details { name: String },
    /// Add filaments to the comparison set
    Select {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove filaments from the comparison set
    Deselect {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Empty the comparison set
    Clear,
    /// Compare the selected filaments side by side
    Compare,
    /// Show or change filters (options as group:key, e.g. specs:low-warping)
    Filters {
        #[arg(long, value_name = "GROUP:KEY")]
        check: Vec<String>,
        #[arg(long, value_name = "GROUP:KEY")]
        uncheck: Vec<String>,
        /// Uncheck every option of a group
        #[arg(long, value_name = "GROUP")]
        clear_group: Vec<String>,
        /// Collapse or expand a group in this listing
        #[arg(long, value_name = "GROUP")]
        toggle: Vec<String>,
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Restore default filters, empty the comparison set, forget saved state
    Reset,
}

impl Command {
    /// Whether the command changes session state worth saving
    pub fn mutates(&self) -> bool {
        match self {
            Command::List { search } => search.is_some(),
            Command::Show { .. } | Command::Scores { .. } | Command::Compare => false,
            Command::Filters {
                check,
                uncheck,
                clear_group,
                toggle,
                search,
            } => {
                !check.is_empty()
                    || !uncheck.is_empty()
                    || !clear_group.is_empty()
                    || !toggle.is_empty()
                    || search.is_some()
            }
            Command::Details { .. }
            | Command::Select { .. }
            | Command::Deselect { .. }
            | Command::Clear
            | Command::Reset => true,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartArg {
    Core,
    Quality,
    Safety,
    Advanced,
}

impl From<ChartArg> for Chart {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Core => Chart::CorePerformance,
            ChartArg::Quality => Chart::QualityUsability,
            ChartArg::Safety => Chart::SafetyEnvironmental,
            ChartArg::Advanced => Chart::AdvancedProperties,
        }
    }
}

fn parse_group(key: &str) -> Result<FilterGroup> {
    FilterGroup::from_key(key).with_context(|| {
        let known: Vec<&str> = FilterGroup::ALL.iter().map(|g| g.key()).collect();
        format!("Unknown filter group '{}' (expected one of: {})", key, known.join(", "))
    })
}

/// Run one command against the session and return its output
pub fn execute(command: &Command, session: &mut Session, json: bool) -> Result<String> {
    debug!("Executing {:?}", command);

    match command {
        Command::List { search } => {
            if let Some(search) = search {
                session.filters.search = search.clone();
            }
            if json {
                return Ok(serde_json::to_string_pretty(&CliFormatter::list_json(session))?);
            }
            Ok(CliFormatter::format_list(session))
        }

        Command::Show { name } => {
            let filament = session.find(name)?;
            if json {
                return Ok(serde_json::to_string_pretty(filament)?);
            }
            let compared = session.comparison().contains(name);
            let mut output = CliFormatter::format_card(filament, compared, true);
            output.push('\n');
            output.push_str(&CliFormatter::format_filament_scores(filament, &Chart::ALL));
            Ok(output)
        }

        Command::Scores { name, chart } => {
            let filament = session.find(name)?;
            let charts: Vec<Chart> = match chart {
                Some(arg) => vec![(*arg).into()],
                None => Chart::ALL.to_vec(),
            };
            Ok(CliFormatter::format_filament_scores(filament, &charts))
        }

        Command::Details { name } => {
            session.find(name)?;
            let expanded = session.ui.toggle_details(name);
            Ok(format!(
                "Details for {} {}\n",
                name,
                if expanded { "shown" } else { "hidden" }
            ))
        }

        Command::Select { names } => {
            for name in names {
                session.toggle_comparison(name, true)?;
            }
            Ok(format!("{}\n", session.compare_label()))
        }

        Command::Deselect { names } => {
            for name in names {
                session.toggle_comparison(name, false)?;
            }
            Ok(format!("{}\n", session.compare_label()))
        }

        Command::Clear => {
            session.clear_comparison();
            Ok(format!("{}\n", session.compare_label()))
        }

        Command::Compare => {
            if !session.can_compare() {
                bail!(
                    "Select at least {} filaments to compare ({} selected)",
                    MIN_COMPARE,
                    session.comparison().len()
                );
            }
            let compared = session.compared();
            let table = build_comparison(&compared).context("Comparison needs at least two filaments")?;
            if json {
                return Ok(serde_json::to_string_pretty(&table)?);
            }
            Ok(CliFormatter::format_comparison(&table))
        }

        Command::Filters {
            check,
            uncheck,
            clear_group,
            toggle,
            search,
        } => {
            for key in clear_group {
                session.filters.clear_group(parse_group(key)?);
            }
            for spec in check {
                let option: FilterOption = spec.parse()?;
                session.filters.set(option, true);
            }
            for spec in uncheck {
                let option: FilterOption = spec.parse()?;
                session.filters.set(option, false);
            }
            for key in toggle {
                session.ui.toggle_group(parse_group(key)?);
            }
            if let Some(search) = search {
                session.filters.search = search.clone();
            }
            Ok(CliFormatter::format_filters(&session.filters, &session.ui))
        }

        Command::Reset => {
            session.reset();
            Ok("Filters, comparison and view state reset\n".to_string())
        }
    }
}
