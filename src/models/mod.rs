//! Core data models
//!
//! Transactions, categories, budget goals and weekly challenges, plus the
//! derived progress values the session reports.

pub mod category;
pub mod challenge;
pub mod goal;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::Category;
pub use challenge::{
    Challenge, ChallengeOutcome, ChallengeProgress, ChallengeStatus, WeekReport,
};
pub use goal::{BudgetStatus, Goal, GoalProgress, WarningTier, DEFAULT_NEAR_LIMIT_RATIO};
pub use ids::{ChallengeId, TransactionId};
pub use money::Money;
pub use transaction::Transaction;
