//! The `plan` command
//!
//! Runs the allocation waterfall over a budget file and prints or exports
//! the result.

use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use super::{open_output, record_run, LoadedBudget};
use crate::audit::AuditEntry;
use crate::config::{PlannerPaths, Settings};
use crate::display::format_allocation;
use crate::error::{PlannerError, PlannerResult};
use crate::export::{export_allocation_csv, export_allocation_json, export_allocation_yaml};
use crate::services::{AllocationEngine, EngineOptions, UndistributedSurplusPolicy};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Terminal table
    #[default]
    Table,
    /// JSON document with monthly and per-paycheck amounts
    Json,
    /// YAML document with monthly and per-paycheck amounts
    Yaml,
    /// One row per category and subcategory
    Csv,
}

/// Arguments for `plan`
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Budget file (YAML, or JSON by extension)
    pub file: PathBuf,

    /// Show per-paycheck amounts in the table (exports always carry both)
    #[arg(short, long)]
    pub per_paycheck: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Reference date for debt due dates (YYYY-MM-DD, default today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Override the configured handling of surplus with no recipient
    #[arg(long)]
    pub surplus_policy: Option<UndistributedSurplusPolicy>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the `plan` command
pub fn handle_plan_command(
    paths: &PlannerPaths,
    settings: &Settings,
    args: PlanArgs,
) -> PlannerResult<()> {
    let budget = LoadedBudget::load(&args.file, settings)?;

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let engine = AllocationEngine::new(EngineOptions {
        as_of,
        surplus_policy: args.surplus_policy.unwrap_or(settings.surplus_policy),
    });
    let snapshot = budget.store.snapshot();
    let result = engine.recalculate(&snapshot.categories, budget.monthly_income, budget.cadence);

    let recorded = record_run(
        paths,
        settings,
        AuditEntry::plan(&result, Some(budget.source_label())),
    )?;

    let mut out = open_output(args.output.as_deref())?;
    let write_err = |e: std::io::Error| PlannerError::Export(e.to_string());

    match args.format {
        OutputFormat::Table => {
            let shown = if args.per_paycheck {
                result.per_paycheck()
            } else {
                result
            };
            writeln!(out, "Plan as of {}", as_of.format(&settings.date_format))
                .map_err(write_err)?;
            write!(out, "{}", format_allocation(&shown, &settings.currency_symbol))
                .map_err(write_err)?;

            if let Some(diff) = recorded.and_then(|entry| entry.diff_summary) {
                writeln!(out, "\nChanged since last plan: {}", diff).map_err(write_err)?;
            }
        }
        OutputFormat::Json => export_allocation_json(&result, &mut out, true)?,
        OutputFormat::Yaml => export_allocation_yaml(&result, &mut out)?,
        OutputFormat::Csv => export_allocation_csv(&result, &mut out)?,
    }

    out.flush().map_err(write_err)?;

    if let Some(path) = &args.output {
        eprintln!("Allocation written to: {}", path.display());
    }

    Ok(())
}
