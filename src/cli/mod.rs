//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the allocation services.

pub mod history;
pub mod plan;
pub mod projection;
pub mod reference;

pub use history::handle_history_command;
pub use plan::{handle_plan_command, OutputFormat, PlanArgs};
pub use projection::{handle_perfect_command, handle_recommend_command, ProjectionArgs};
pub use reference::{
    handle_catalog_command, handle_config_command, handle_convert_command,
    handle_limits_command,
};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::audit::{AuditEntry, AuditLogger};
use crate::catalog::{BudgetFile, CategoryStore};
use crate::config::{PlannerPaths, Settings};
use crate::error::{PlannerError, PlannerResult};
use crate::models::PaymentCadence;

/// A budget file resolved against the seed catalog
pub struct LoadedBudget {
    pub source: PathBuf,
    pub store: CategoryStore,
    pub cadence: PaymentCadence,
    pub monthly_income: f64,
}

impl LoadedBudget {
    /// Load `path` and activate its selections in a freshly seeded catalog
    pub fn load(path: &Path, settings: &Settings) -> PlannerResult<Self> {
        let budget = BudgetFile::load(path)?;
        let cadence = budget.cadence_or(settings.default_cadence);

        let mut store = CategoryStore::seeded();
        budget.apply(&mut store)?;

        Ok(Self {
            source: path.to_path_buf(),
            store,
            cadence,
            monthly_income: budget.monthly_income(cadence),
        })
    }

    pub fn source_label(&self) -> String {
        self.source.display().to_string()
    }
}

/// Open `path` for writing, or stdout when no path is given
pub(crate) fn open_output(path: Option<&Path>) -> PlannerResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PlannerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Append a run to the audit log when auditing is enabled
///
/// Returns the stored entry, with its diff against the previous run of the
/// same operation.
pub(crate) fn record_run(
    paths: &PlannerPaths,
    settings: &Settings,
    entry: AuditEntry,
) -> PlannerResult<Option<AuditEntry>> {
    if !settings.audit_enabled {
        return Ok(None);
    }

    let logger = AuditLogger::new(paths.audit_log());
    logger.record(entry).map(Some)
}
