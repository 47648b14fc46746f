//! Audit logging for planner runs
//!
//! Every allocation and projection run is appended to a line-delimited JSON
//! log (`audit.log`) together with a summary of what changed since the
//! previous run of the same kind.
//!
//! - `AuditEntry`: one run, with its inputs, totals and full output
//! - `AuditLogger`: appends entries and reads them back
//! - `diff_runs`: human-readable changes between two outputs
//!
//! # Example
//!
//! ```rust,ignore
//! use paycheck::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = logger.record(AuditEntry::plan(&result, Some("budget.yaml".into())))?;
//! println!("{}", entry.format_human_readable());
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{diff_runs, generate_detailed_diff};
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
