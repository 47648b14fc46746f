//! The `history` command

use crate::audit::AuditLogger;
use crate::config::PlannerPaths;
use crate::error::PlannerResult;

/// Print the most recent audit log entries, oldest first
pub fn handle_history_command(paths: &PlannerPaths, limit: usize) -> PlannerResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No runs recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    let total = logger.entry_count()?;
    if total > entries.len() {
        println!();
        println!("Showing {} of {} entries.", entries.len(), total);
    }

    Ok(())
}
