//! Audit log viewing

use std::io::Write;

use crate::audit::AuditLogger;
use crate::error::FinanceResult;

/// Print the most recent audit log entries
pub fn handle_audit_command<W: Write>(
    logger: &AuditLogger,
    count: usize,
    out: &mut W,
) -> FinanceResult<()> {
    let entries = logger.read_recent(count)?;

    if entries.is_empty() {
        writeln!(out, "Audit log is empty ({}).", logger.path().display())?;
        return Ok(());
    }

    for entry in &entries {
        writeln!(out, "{}", entry.describe())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEntry, EntityType};
    use tempfile::TempDir;

    #[test]
    fn test_empty_and_filled_log() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));

        let mut out = Vec::new();
        handle_audit_command(&logger, 5, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Audit log is empty"));

        logger
            .log(&AuditEntry::create(
                EntityType::Goal,
                "Groceries",
                None,
                &serde_json::json!({}),
            ))
            .unwrap();

        let mut out = Vec::new();
        handle_audit_command(&logger, 5, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("CREATE Goal Groceries"));
    }
}
