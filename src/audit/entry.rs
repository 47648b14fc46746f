//! Audit entry data structures
//!
//! One entry per planner run: what was computed, for which income and
//! cadence, the full output and how it differs from the previous run of the
//! same kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AllocationResult, AllocationSummary, PaymentCadence};

/// Kinds of runs that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Waterfall allocation
    Plan,
    /// Recommended budget projection
    Recommend,
    /// 50/30/20 projection
    Perfect,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Plan => write!(f, "PLAN"),
            Operation::Recommend => write!(f, "RECOMMEND"),
            Operation::Perfect => write!(f, "PERFECT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the run happened (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub cadence: PaymentCadence,

    /// Monthly income the run used
    pub monthly_income: f64,

    /// Where the budget came from, usually the budget file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Totals, for allocation runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<AllocationSummary>,

    /// JSON representation of the full output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,

    /// Human-readable changes since the previous run of this operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a waterfall allocation
    pub fn plan(result: &AllocationResult, source: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Plan,
            cadence: result.cadence,
            monthly_income: result.income,
            source,
            summary: Some(result.summary),
            output: serde_json::to_value(result).ok(),
            diff_summary: None,
        }
    }

    /// Entry for a projection
    pub fn projection<T: Serialize>(
        operation: Operation,
        cadence: PaymentCadence,
        monthly_income: f64,
        source: Option<String>,
        output: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            cadence,
            monthly_income,
            source,
            summary: None,
            output: serde_json::to_value(output).ok(),
            diff_summary: None,
        }
    }

    pub fn with_diff(mut self, diff_summary: Option<String>) -> Self {
        self.diff_summary = diff_summary;
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {:.2}/month",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.cadence,
            self.monthly_income
        );

        if let Some(source) = &self.source {
            output.push_str(&format!(" ({})", source));
        }

        if let Some(summary) = &self.summary {
            output.push_str(&format!(
                "\n  Allocated: {:.2}, surplus/deficit: {:.2}",
                summary.total_allocated, summary.surplus_or_deficit
            ));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AmountBasis;
    use serde_json::json;

    fn result() -> AllocationResult {
        AllocationResult {
            cadence: PaymentCadence::BiWeekly,
            basis: AmountBasis::Monthly,
            income: 4000.0,
            categories: Vec::new(),
            summary: AllocationSummary::from_lines(&[], 4000.0, 0.0),
            recommendations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Plan.to_string(), "PLAN");
        assert_eq!(Operation::Recommend.to_string(), "RECOMMEND");
        assert_eq!(Operation::Perfect.to_string(), "PERFECT");
    }

    #[test]
    fn test_plan_entry() {
        let entry = AuditEntry::plan(&result(), Some("budget.yaml".into()));

        assert_eq!(entry.operation, Operation::Plan);
        assert_eq!(entry.monthly_income, 4000.0);
        assert_eq!(entry.summary.unwrap().surplus_or_deficit, 4000.0);
        assert!(entry.output.is_some());
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_projection_entry() {
        let entry = AuditEntry::projection(
            Operation::Perfect,
            PaymentCadence::Monthly,
            3000.0,
            None,
            &json!({"pools": []}),
        )
        .with_diff(Some("pools: [0 items] -> [3 items]".into()));

        assert_eq!(entry.operation, Operation::Perfect);
        assert!(entry.summary.is_none());
        assert!(entry.diff_summary.is_some());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::plan(&result(), None);

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"plan\""));
        assert!(!json.contains("\"source\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Plan);
        assert_eq!(deserialized.cadence, PaymentCadence::BiWeekly);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::plan(&result(), Some("budget.yaml".into()))
            .with_diff(Some("Housing: 1400.00 -> 1325.00".into()));

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("PLAN"));
        assert!(formatted.contains("Bi-weekly"));
        assert!(formatted.contains("4000.00/month"));
        assert!(formatted.contains("budget.yaml"));
        assert!(formatted.contains("Changes: Housing"));
    }
}
