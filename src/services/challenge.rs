//! Challenge service
//!
//! Runs the weekly challenge lifecycle:
//!
//! ```text
//! NoChallenge --accept--> Active --complete_week--> NoChallenge
//!                                \--abandon-------> NoChallenge
//! ```
//!
//! Closing a week (success or failure) clears weekly spending for every
//! category and, under the default policy, the whole transaction history.
//! Abandoning clears weekly spending only. Calls made in the wrong state
//! fail with `InvalidState` and change nothing.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Category, Challenge, ChallengeOutcome, ChallengeProgress, ChallengeStatus, Money, WeekReport,
};
use crate::session::Session;

/// Service for the weekly spending challenge
pub struct ChallengeService<'a> {
    session: &'a Session,
}

impl<'a> ChallengeService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// The active challenge, if any
    pub fn active_challenge(&self) -> FinanceResult<Option<Challenge>> {
        self.session.challenge.get()
    }

    fn require_active(&self, operation: &'static str) -> FinanceResult<Challenge> {
        self.session
            .challenge
            .get()?
            .ok_or_else(|| FinanceError::no_active_challenge(operation))
    }

    /// Start a challenge to keep `category` at or under `limit` this week
    ///
    /// Only legal while no challenge is active.
    pub fn accept_challenge(&self, category: Category, limit: Money) -> FinanceResult<Challenge> {
        const OPERATION: &str = "accept challenge";

        if self.session.challenge.is_active()? {
            return Err(FinanceError::challenge_already_active(OPERATION));
        }

        let challenge = Challenge::new(category, limit);

        challenge
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        if !self.session.challenge.try_fill(challenge.clone())? {
            return Err(FinanceError::challenge_already_active(OPERATION));
        }

        self.session.log_create(
            EntityType::Challenge,
            challenge.id.to_string(),
            Some(category.to_string()),
            &challenge,
        );

        Ok(challenge)
    }

    /// This week's spending against the active challenge
    pub fn current_progress(&self) -> FinanceResult<ChallengeProgress> {
        let challenge = self.require_active("show challenge progress")?;
        let spent = self.session.ledger.weekly_total(challenge.category)?;
        Ok(challenge.progress(spent))
    }

    /// Whether the active challenge is still on track; never changes state
    pub fn evaluate_status(&self) -> FinanceResult<ChallengeStatus> {
        let challenge = self.require_active("evaluate challenge")?;
        let spent = self.session.ledger.weekly_total(challenge.category)?;
        Ok(challenge.progress(spent).status())
    }

    /// Close the week, judge the challenge and reset for the next one
    pub fn complete_week(&self) -> FinanceResult<WeekReport> {
        let mut challenge = self.require_active("complete week")?;
        let spent = self.session.ledger.weekly_total(challenge.category)?;

        let outcome = challenge.outcome_for(spent);
        if outcome == ChallengeOutcome::Succeeded {
            challenge.is_completed = true;
        }

        let clear_history = self.session.policy().reset_ledger_on_week_close;
        let cleared_transactions = if clear_history {
            self.session.ledger.transaction_count()?
        } else {
            0
        };

        self.session.ledger.reset_week(clear_history)?;
        self.session.challenge.take()?;

        let mut entries = vec![
            AuditEntry::delete(
                EntityType::Challenge,
                challenge.id.to_string(),
                Some(challenge.category.to_string()),
                &challenge,
                Some(format!(
                    "week closed, {}: spent {} of {}",
                    outcome, spent, challenge.limit
                )),
            ),
            weekly_reset_entry("week closed"),
        ];
        if clear_history {
            entries.push(AuditEntry::delete(
                EntityType::Ledger,
                "session",
                None,
                &serde_json::json!({ "transactions": cleared_transactions }),
                Some(format!("cleared {} transaction(s)", cleared_transactions)),
            ));
        }
        self.session.log_entries(&entries);

        Ok(WeekReport {
            challenge,
            spent,
            outcome,
        })
    }

    /// Give up on the active challenge; weekly spending is cleared but the
    /// transaction history stays
    pub fn abandon_challenge(&self) -> FinanceResult<Challenge> {
        let challenge = self.require_active("abandon challenge")?;

        self.session.ledger.clear_weekly()?;
        self.session.challenge.take()?;

        self.session.log_entries(&[
            AuditEntry::delete(
                EntityType::Challenge,
                challenge.id.to_string(),
                Some(challenge.category.to_string()),
                &challenge,
                Some("abandoned".to_string()),
            ),
            weekly_reset_entry("challenge abandoned"),
        ]);

        Ok(challenge)
    }
}

fn weekly_reset_entry(reason: &str) -> AuditEntry {
    AuditEntry::delete(
        EntityType::WeeklySpending,
        "week",
        None,
        &serde_json::Value::Null,
        Some(format!("weekly spending cleared ({})", reason)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::services::{GoalService, LedgerService};
    use crate::session::BudgetPolicy;
    use tempfile::TempDir;

    fn naira(amount: i64) -> Money {
        Money::from_major_minor(amount, 0)
    }

    fn assert_weekly_cleared(session: &Session) {
        let ledger = LedgerService::new(session);
        for category in Category::ALL {
            assert!(ledger.weekly_total(category).unwrap().is_zero());
        }
    }

    #[test]
    fn test_successful_week() {
        let session = Session::default();
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);

        challenges.accept_challenge(Category::Transportation, naira(2000)).unwrap();
        ledger.record_transaction(Category::Transportation, naira(1500)).unwrap();

        assert_eq!(challenges.evaluate_status().unwrap(), ChallengeStatus::OnTrack);

        let report = challenges.complete_week().unwrap();
        assert_eq!(report.outcome, ChallengeOutcome::Succeeded);
        assert!(report.challenge.is_completed);
        assert_eq!(report.spent, naira(1500));

        assert!(challenges.current_progress().unwrap_err().is_invalid_state());
        assert!(challenges.active_challenge().unwrap().is_none());
    }

    #[test]
    fn test_failed_week_resets_spending() {
        let session = Session::default();
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);

        challenges.accept_challenge(Category::Groceries, naira(1000)).unwrap();
        ledger.record_transaction(Category::Groceries, naira(1200)).unwrap();
        assert_eq!(challenges.evaluate_status().unwrap(), ChallengeStatus::LimitExceeded);

        let report = challenges.complete_week().unwrap();
        assert_eq!(report.outcome, ChallengeOutcome::Failed);
        assert!(!report.challenge.is_completed);

        assert!(ledger.weekly_total(Category::Groceries).unwrap().is_zero());
        assert_weekly_cleared(&session);
    }

    #[test]
    fn test_week_close_clears_history_by_default() {
        let session = Session::default();
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);
        let goals = GoalService::new(&session);

        goals.set_goal(Category::Textbooks, naira(100)).unwrap();
        ledger.record_transaction(Category::Textbooks, naira(90)).unwrap();
        challenges.accept_challenge(Category::CampusFood, naira(50)).unwrap();
        challenges.complete_week().unwrap();

        assert!(ledger.all_transactions().unwrap().is_empty());
        assert!(ledger.total_for(Category::Textbooks).unwrap().is_zero());
        // Goals survive; only their spending is gone
        assert_eq!(goals.progress(Category::Textbooks).unwrap().spent, Money::zero());
    }

    #[test]
    fn test_week_close_can_keep_history() {
        let session = Session::new(BudgetPolicy {
            reset_ledger_on_week_close: false,
            ..BudgetPolicy::default()
        });
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);

        challenges.accept_challenge(Category::SocialLife, naira(500)).unwrap();
        ledger.record_transaction(Category::SocialLife, naira(200)).unwrap();
        challenges.complete_week().unwrap();

        assert_eq!(ledger.total_for(Category::SocialLife).unwrap(), naira(200));
        assert_weekly_cleared(&session);
    }

    #[test]
    fn test_abandon_keeps_history() {
        let session = Session::default();
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);

        challenges.accept_challenge(Category::CampusFood, naira(800)).unwrap();
        ledger.record_transaction(Category::CampusFood, naira(300)).unwrap();
        ledger.record_transaction(Category::Groceries, naira(100)).unwrap();

        let abandoned = challenges.abandon_challenge().unwrap();
        assert_eq!(abandoned.category, Category::CampusFood);

        assert_weekly_cleared(&session);
        assert_eq!(ledger.total_for(Category::CampusFood).unwrap(), naira(300));
        assert!(challenges.current_progress().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_wrong_state_calls_fail_without_change() {
        let session = Session::default();
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);

        ledger.record_transaction(Category::Groceries, naira(10)).unwrap();

        assert!(challenges.complete_week().unwrap_err().is_invalid_state());
        assert!(challenges.abandon_challenge().unwrap_err().is_invalid_state());
        assert!(challenges.evaluate_status().unwrap_err().is_invalid_state());
        assert_eq!(ledger.weekly_total(Category::Groceries).unwrap(), naira(10));
        assert_eq!(ledger.all_transactions().unwrap().len(), 1);

        let first = challenges.accept_challenge(Category::Groceries, naira(50)).unwrap();
        let err = challenges
            .accept_challenge(Category::Transportation, naira(70))
            .unwrap_err();
        assert!(err.is_invalid_state());
        assert_eq!(challenges.active_challenge().unwrap().unwrap(), first);
    }

    #[test]
    fn test_negative_limit_rejected() {
        let session = Session::default();
        let challenges = ChallengeService::new(&session);

        let err = challenges.accept_challenge(Category::Groceries, naira(-1)).unwrap_err();
        assert!(err.is_validation());
        assert!(challenges.active_challenge().unwrap().is_none());
    }

    #[test]
    fn test_progress_reads_weekly_spending_only() {
        let session = Session::default();
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);

        // Spending before an abandoned challenge doesn't count toward the next one
        challenges.accept_challenge(Category::CampusFood, naira(1000)).unwrap();
        ledger.record_transaction(Category::CampusFood, naira(700)).unwrap();
        challenges.abandon_challenge().unwrap();

        challenges.accept_challenge(Category::CampusFood, naira(1000)).unwrap();
        ledger.record_transaction(Category::CampusFood, naira(250)).unwrap();

        let progress = challenges.current_progress().unwrap();
        assert_eq!(progress.spent, naira(250));
        assert_eq!(progress.limit, naira(1000));
        assert!((progress.ratio - 0.25).abs() < 1e-9);
        assert_eq!(ledger.total_for(Category::CampusFood).unwrap(), naira(950));
    }

    #[test]
    fn test_audit_failure_keeps_week_report() {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::default().with_audit(AuditLogger::new(temp_dir.path().into()));
        let challenges = ChallengeService::new(&session);
        let ledger = LedgerService::new(&session);

        let accepted = challenges.accept_challenge(Category::Groceries, naira(1000)).unwrap();
        assert_eq!(challenges.active_challenge().unwrap(), Some(accepted));

        ledger.record_transaction(Category::Groceries, naira(1200)).unwrap();
        let report = challenges.complete_week().unwrap();

        assert_eq!(report.outcome, ChallengeOutcome::Failed);
        assert_eq!(report.spent, naira(1200));
        assert!(challenges.active_challenge().unwrap().is_none());
        assert_eq!(session.take_audit_warnings().len(), 3);
    }

    #[test]
    fn test_lifecycle_is_audited() {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::default()
            .with_audit(AuditLogger::new(temp_dir.path().join("audit.log")));
        let challenges = ChallengeService::new(&session);

        challenges.accept_challenge(Category::Groceries, naira(100)).unwrap();
        challenges.complete_week().unwrap();

        let entries = session.audit_logger().unwrap().read_all().unwrap();
        let kinds: Vec<_> = entries.iter().map(|e| (e.operation, e.entity_type)).collect();
        assert_eq!(
            kinds,
            vec![
                (Operation::Create, EntityType::Challenge),
                (Operation::Delete, EntityType::Challenge),
                (Operation::Delete, EntityType::WeeklySpending),
                (Operation::Delete, EntityType::Ledger),
            ]
        );
    }
}
