//! Budget goal model
//!
//! A goal is a spending target for one category. Progress against a goal is
//! derived from ledger totals and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;

/// Fraction of a goal at which the near-limit warning starts
pub const DEFAULT_NEAR_LIMIT_RATIO: f64 = 0.8;

/// A spending target for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub category: Category,
    pub target: Money,
    pub set_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(category: Category, target: Money) -> Self {
        Self {
            category,
            target,
            set_at: Utc::now(),
        }
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.target.is_negative() {
            return Err(GoalValidationError::NegativeTarget(self.target));
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.target)
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    NegativeTarget(Money),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTarget(target) => {
                write!(f, "Goal target cannot be negative, got {}", target)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

/// Health of a category relative to its goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum BudgetStatus {
    /// Comfortably under the target
    Ok,
    /// At or past the warning threshold; `percent` is spent/target rounded
    NearLimit { percent: u32 },
    /// Spending has met or passed the target
    Reached,
}

/// Display severity of a budget status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningTier {
    None,
    Caution,
    Critical,
}

impl BudgetStatus {
    /// Derive the status for `spent` against `target`, first match wins:
    /// reached, then near limit, then ok.
    pub fn derive(spent: Money, target: Money, near_limit_ratio: f64) -> Self {
        if spent >= target {
            return BudgetStatus::Reached;
        }

        match spent.ratio_of(target) {
            Some(ratio) if ratio >= near_limit_ratio => BudgetStatus::NearLimit {
                percent: (ratio * 100.0).round() as u32,
            },
            _ => BudgetStatus::Ok,
        }
    }

    pub fn tier(&self) -> WarningTier {
        match self {
            BudgetStatus::Ok => WarningTier::None,
            BudgetStatus::NearLimit { .. } => WarningTier::Caution,
            BudgetStatus::Reached => WarningTier::Critical,
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Ok => write!(f, "OK"),
            BudgetStatus::NearLimit { percent } => write!(f, "Near limit ({}%)", percent),
            BudgetStatus::Reached => write!(f, "Budget reached"),
        }
    }
}

/// Progress of one category against its goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub category: Category,
    pub spent: Money,
    pub target: Money,
    /// spent/target clamped to [0, 1] for progress bars; 0 when target is 0
    pub ratio: f64,
    /// target - spent, negative once overspent
    pub remaining: Money,
    pub status: BudgetStatus,
}

impl GoalProgress {
    /// Compute progress for a goal given the category's ledger total
    pub fn compute(goal: &Goal, spent: Money, near_limit_ratio: f64) -> Self {
        let ratio = spent
            .ratio_of(goal.target)
            .map(|r| r.clamp(0.0, 1.0))
            .unwrap_or(0.0);

        Self {
            category: goal.category,
            spent,
            target: goal.target,
            ratio,
            remaining: goal.target - spent,
            status: BudgetStatus::derive(spent, goal.target, near_limit_ratio),
        }
    }
}
