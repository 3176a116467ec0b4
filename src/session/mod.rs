//! Session state
//!
//! A `Session` is the explicit context every core operation runs against:
//! the transaction ledger with its weekly view, the goal table and the
//! single challenge slot. Nothing is shared between sessions, so one value
//! per user keeps their state isolated. State lives only as long as the
//! session value.

pub mod challenge;
pub mod goals;
pub mod ledger;

pub use challenge::ChallengeSlot;
pub use goals::GoalStore;
pub use ledger::{LedgerStore, TransactionHistory};

use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{FinanceError, FinanceResult};
use crate::models::DEFAULT_NEAR_LIMIT_RATIO;

/// Budget rules applied by the services
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetPolicy {
    /// Fraction of a goal at which the near-limit warning starts
    pub near_limit_ratio: f64,
    /// Whether closing a challenge week also clears the transaction history
    pub reset_ledger_on_week_close: bool,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            near_limit_ratio: DEFAULT_NEAR_LIMIT_RATIO,
            reset_ledger_on_week_close: true,
        }
    }
}

/// One user's budgeting session
pub struct Session {
    policy: BudgetPolicy,
    audit: Option<AuditLogger>,
    audit_warnings: Mutex<Vec<String>>,
    pub ledger: LedgerStore,
    pub goals: GoalStore,
    pub challenge: ChallengeSlot,
}

impl Session {
    /// Create an empty session with the given policy and no audit log
    pub fn new(policy: BudgetPolicy) -> Self {
        Self {
            policy,
            audit: None,
            audit_warnings: Mutex::new(Vec::new()),
            ledger: LedgerStore::new(),
            goals: GoalStore::new(),
            challenge: ChallengeSlot::new(),
        }
    }

    /// Record every mutating operation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn policy(&self) -> &BudgetPolicy {
        &self.policy
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Write entries to the audit log, if one is attached
    ///
    /// Called after a change is committed, so a failed write never fails or
    /// undoes the operation. The error is queued for `take_audit_warnings`.
    pub fn log_entries(&self, entries: &[AuditEntry]) {
        let Some(logger) = &self.audit else {
            return;
        };

        if let Err(e) = logger.log_batch(entries) {
            if let Ok(mut warnings) = self.audit_warnings.lock() {
                warnings.push(e.to_string());
            }
        }
    }

    /// Log a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        if self.audit.is_none() {
            return;
        }
        self.log_entries(&[AuditEntry::create(
            entity_type,
            entity_id,
            entity_name,
            entity,
        )]);
    }

    /// Log an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) {
        if self.audit.is_none() {
            return;
        }
        self.log_entries(&[AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        )]);
    }

    /// Drain audit write failures recorded since the last call
    pub fn take_audit_warnings(&self) -> Vec<String> {
        self.audit_warnings
            .lock()
            .map(|mut warnings| std::mem::take(&mut *warnings))
            .unwrap_or_default()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BudgetPolicy::default())
    }
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> FinanceResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| FinanceError::State(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> FinanceResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| FinanceError::State(format!("Failed to acquire write lock: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use tempfile::TempDir;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::default();

        assert!(session.ledger.history().unwrap().is_empty());
        assert!(session.goals.all().unwrap().is_empty());
        assert!(session.challenge.get().unwrap().is_none());
        assert!(session.audit_logger().is_none());
        assert!(session.policy().reset_ledger_on_week_close);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let a = Session::default();
        let b = Session::default();

        a.ledger
            .append(crate::models::Transaction::new(
                Category::Groceries,
                Money::from_minor(100),
            ))
            .unwrap();

        assert_eq!(a.ledger.total_for(Category::Groceries).unwrap().minor_units(), 100);
        assert!(b.ledger.total_for(Category::Groceries).unwrap().is_zero());
    }

    #[test]
    fn test_logging_without_logger_is_noop() {
        let session = Session::default();
        session.log_create(EntityType::Goal, "Other", None, &serde_json::json!({}));
        assert!(session.take_audit_warnings().is_empty());
    }

    #[test]
    fn test_logging_with_logger() {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::default()
            .with_audit(AuditLogger::new(temp_dir.path().join("audit.log")));

        session.log_create(EntityType::Goal, "Other", None, &serde_json::json!({}));

        let logger = session.audit_logger().unwrap();
        assert_eq!(logger.read_all().unwrap().len(), 1);
        assert!(session.take_audit_warnings().is_empty());
    }

    #[test]
    fn test_failed_audit_write_becomes_warning() {
        let temp_dir = TempDir::new().unwrap();
        // A directory can't be opened for appending
        let session = Session::default().with_audit(AuditLogger::new(temp_dir.path().into()));

        session.log_create(EntityType::Goal, "Other", None, &serde_json::json!({}));
        session.log_create(EntityType::Goal, "Groceries", None, &serde_json::json!({}));

        let warnings = session.take_audit_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("I/O error: Failed to open audit log"));
        assert!(session.take_audit_warnings().is_empty());
    }
}
