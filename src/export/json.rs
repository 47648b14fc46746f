//! JSON export of allocation results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{PlannerError, PlannerResult};
use crate::models::AllocationResult;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// An allocation with both of its bases and export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Amounts on the monthly basis
    pub monthly: AllocationResult,

    /// The same amounts per paycheck
    pub per_paycheck: AllocationResult,
}

impl AllocationExport {
    /// Wrap a monthly result; the per-paycheck copy is derived from it
    pub fn new(result: &AllocationResult) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            monthly: result.clone(),
            per_paycheck: result.per_paycheck(),
        }
    }

    /// Check the export can be read back by this version
    pub fn validate(&self) -> Result<(), String> {
        let major = self.schema_version.split('.').next().unwrap_or_default();
        let supported = EXPORT_SCHEMA_VERSION.split('.').next().unwrap_or_default();
        if major != supported {
            return Err(format!(
                "Unsupported export schema version {} (expected {}.x)",
                self.schema_version, supported
            ));
        }
        Ok(())
    }
}

/// Write an allocation export as JSON
pub fn export_allocation_json<W: Write>(
    result: &AllocationResult,
    writer: &mut W,
    pretty: bool,
) -> PlannerResult<()> {
    let export = AllocationExport::new(result);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| PlannerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| PlannerError::Export(e.to_string()))?;
    Ok(())
}

/// Read an allocation export back
pub fn import_allocation_json(json: &str) -> PlannerResult<AllocationExport> {
    let export: AllocationExport = serde_json::from_str(json)?;
    export.validate().map_err(PlannerError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationSummary, AmountBasis, PaymentCadence};

    fn result() -> AllocationResult {
        AllocationResult {
            cadence: PaymentCadence::SemiMonthly,
            basis: AmountBasis::Monthly,
            income: 3000.0,
            categories: Vec::new(),
            summary: AllocationSummary::from_lines(&[], 3000.0, 0.0),
            recommendations: vec!["No Emergency Fund is selected".into()],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_export_and_import() {
        let mut buffer = Vec::new();
        export_allocation_json(&result(), &mut buffer, true).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"schema_version\": \"1.0.0\""));

        let imported = import_allocation_json(&text).unwrap();
        assert_eq!(imported.monthly, result());
        assert_eq!(imported.per_paycheck.income, 1500.0);
        assert_eq!(imported.per_paycheck.basis, AmountBasis::PerPaycheck);
    }

    #[test]
    fn test_rejects_future_schema() {
        let mut export = AllocationExport::new(&result());
        export.schema_version = "2.0.0".into();
        let json = serde_json::to_string(&export).unwrap();

        let err = import_allocation_json(&json).unwrap_err();
        assert!(matches!(err, PlannerError::Export(_)));
    }
}
