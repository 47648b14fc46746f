//! Audit logger for the append-only run log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{PlannerError, PlannerResult};

use super::diff::diff_runs;
use super::entry::{AuditEntry, Operation};

/// Handles writing audit entries to the audit log file (JSONL)
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush
    pub fn log(&self, entry: &AuditEntry) -> PlannerResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlannerError::Io(format!("Failed to create log directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| PlannerError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| PlannerError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| PlannerError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| PlannerError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Log a run, filling in its diff against the previous run of the same
    /// operation
    pub fn record(&self, entry: AuditEntry) -> PlannerResult<AuditEntry> {
        let diff = match (self.last_of(entry.operation)?, &entry.output) {
            (Some(previous), Some(current)) => previous
                .output
                .as_ref()
                .and_then(|before| diff_runs(before, current)),
            _ => None,
        };

        let entry = entry.with_diff(diff);
        self.log(&entry)?;
        Ok(entry)
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> PlannerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| PlannerError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                PlannerError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                PlannerError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> PlannerResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// The most recent entry for one operation
    pub fn last_of(&self, operation: Operation) -> PlannerResult<Option<AuditEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .rev()
            .find(|e| e.operation == operation))
    }

    pub fn entry_count(&self) -> PlannerResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AllocationResult, AllocationSummary, AmountBasis, CategoryAllocation, CategoryId,
        CategoryKind, PaymentCadence,
    };
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path);
        (logger, temp_dir)
    }

    fn result_with_housing(amount: f64) -> AllocationResult {
        let lines = vec![CategoryAllocation {
            id: CategoryId::new(),
            name: "Housing".into(),
            kind: CategoryKind::Need,
            priority: 1,
            amount,
            subcategories: Vec::new(),
        }];
        AllocationResult {
            cadence: PaymentCadence::Monthly,
            basis: AmountBasis::Monthly,
            income: 5000.0,
            summary: AllocationSummary::from_lines(&lines, 5000.0, 0.0),
            categories: lines,
            recommendations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        logger
            .log(&AuditEntry::plan(&result_with_housing(1400.0), None))
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Plan);
    }

    #[test]
    fn test_record_diffs_against_same_operation() {
        let (logger, _temp) = create_test_logger();

        let first = logger
            .record(AuditEntry::plan(&result_with_housing(1400.0), None))
            .unwrap();
        assert!(first.diff_summary.is_none());

        logger
            .record(AuditEntry::projection(
                Operation::Perfect,
                PaymentCadence::Monthly,
                5000.0,
                None,
                &json!({"pools": []}),
            ))
            .unwrap();

        let second = logger
            .record(AuditEntry::plan(&result_with_housing(1325.0), None))
            .unwrap();
        let diff = second.diff_summary.unwrap();
        assert!(diff.contains("Housing: 1400.00 -> 1325.00"));

        assert_eq!(logger.entry_count().unwrap(), 3);
        let stored = logger.last_of(Operation::Plan).unwrap().unwrap();
        assert_eq!(stored.diff_summary.as_deref(), Some(diff.as_str()));
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            let entry = AuditEntry::projection(
                Operation::Recommend,
                PaymentCadence::Weekly,
                f64::from(i) * 100.0,
                None,
                &json!({"index": i}),
            );
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].monthly_income, 700.0);
        assert_eq!(recent[2].monthly_income, 900.0);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.exists());
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.last_of(Operation::Plan).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let (logger, _temp) = create_test_logger();
        std::fs::write(logger.path(), "{not json}\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(matches!(err, PlannerError::Json(_)));
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger
            .log(&AuditEntry::plan(&result_with_housing(1400.0), None))
            .unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(logger2.read_all().unwrap().len(), 1);
    }
}
