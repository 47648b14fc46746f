//! The `recommend` and `perfect` commands

use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use super::{open_output, record_run, LoadedBudget, OutputFormat};
use crate::audit::{AuditEntry, Operation};
use crate::config::{PlannerPaths, Settings};
use crate::display::{format_perfect, format_recommended};
use crate::error::{PlannerError, PlannerResult};
use crate::services::{perfect_budget, recommended_budget};

/// Arguments shared by the projection commands
#[derive(Args, Debug)]
pub struct ProjectionArgs {
    /// Budget file (YAML, or JSON by extension)
    pub file: PathBuf,

    /// Output format (csv is not available for projections)
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Reference date for debt due dates (YYYY-MM-DD, default today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the `recommend` command
pub fn handle_recommend_command(
    paths: &PlannerPaths,
    settings: &Settings,
    args: ProjectionArgs,
) -> PlannerResult<()> {
    let budget = LoadedBudget::load(&args.file, settings)?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let snapshot = budget.store.snapshot();
    let projection = recommended_budget(
        &snapshot.categories,
        budget.monthly_income,
        budget.cadence,
        as_of,
    );

    record_run(
        paths,
        settings,
        AuditEntry::projection(
            Operation::Recommend,
            budget.cadence,
            budget.monthly_income,
            Some(budget.source_label()),
            &projection,
        ),
    )?;

    write_projection(&args, &projection, || {
        format_recommended(&projection, &settings.currency_symbol)
    })
}

/// Handle the `perfect` command
pub fn handle_perfect_command(
    paths: &PlannerPaths,
    settings: &Settings,
    args: ProjectionArgs,
) -> PlannerResult<()> {
    let budget = LoadedBudget::load(&args.file, settings)?;

    let snapshot = budget.store.snapshot();
    let projection = perfect_budget(&snapshot.categories, budget.monthly_income, budget.cadence);

    record_run(
        paths,
        settings,
        AuditEntry::projection(
            Operation::Perfect,
            budget.cadence,
            budget.monthly_income,
            Some(budget.source_label()),
            &projection,
        ),
    )?;

    write_projection(&args, &projection, || {
        format_perfect(&projection, &settings.currency_symbol)
    })
}

fn write_projection<T, F>(args: &ProjectionArgs, projection: &T, table: F) -> PlannerResult<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if args.format == OutputFormat::Csv {
        return Err(PlannerError::Validation(
            "CSV output is only available for plan; use table, json or yaml".into(),
        ));
    }

    let mut out = open_output(args.output.as_deref())?;
    let write_err = |e: std::io::Error| PlannerError::Export(e.to_string());

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, projection)
                .map_err(|e| PlannerError::Export(e.to_string()))?;
            writeln!(out).map_err(write_err)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut out, projection)
            .map_err(|e| PlannerError::Export(e.to_string()))?,
        _ => write!(out, "{}", table()).map_err(write_err)?,
    }

    out.flush().map_err(write_err)?;
    Ok(())
}
