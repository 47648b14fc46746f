//! YAML export of allocation results

use std::io::Write;

use crate::error::{PlannerError, PlannerResult};
use crate::export::json::AllocationExport;
use crate::models::AllocationResult;

/// Write an allocation export as YAML, with a short header comment
pub fn export_allocation_yaml<W: Write>(
    result: &AllocationResult,
    writer: &mut W,
) -> PlannerResult<()> {
    let export = AllocationExport::new(result);
    let export_err = |e: std::io::Error| PlannerError::Export(e.to_string());

    writeln!(writer, "# Paycheck allocation").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(
        writer,
        "# Income: {:.2} monthly, {} paychecks",
        result.income, result.cadence
    )
    .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| PlannerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a YAML allocation export back
pub fn import_allocation_yaml(yaml: &str) -> PlannerResult<AllocationExport> {
    let export: AllocationExport = serde_yaml::from_str(yaml)?;
    export.validate().map_err(PlannerError::Export)?;
    Ok(export)
}
