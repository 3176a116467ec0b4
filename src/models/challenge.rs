//! Weekly challenge model
//!
//! A challenge is a commitment to keep one category's weekly spending at or
//! under a limit. At most one challenge is active per session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ChallengeId;
use super::money::Money;

/// The active weekly challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub category: Category,
    pub limit: Money,
    /// Set when the week closes under the limit, just before the slot is cleared
    pub is_completed: bool,
    pub accepted_at: DateTime<Utc>,
}

impl Challenge {
    pub fn new(category: Category, limit: Money) -> Self {
        Self {
            id: ChallengeId::new(),
            category,
            limit,
            is_completed: false,
            accepted_at: Utc::now(),
        }
    }

    /// Validate the challenge
    pub fn validate(&self) -> Result<(), ChallengeValidationError> {
        if self.limit.is_negative() {
            return Err(ChallengeValidationError::NegativeLimit(self.limit));
        }

        Ok(())
    }

    /// Progress of `spent` (this week's spending in the challenged category)
    pub fn progress(&self, spent: Money) -> ChallengeProgress {
        let ratio = if self.limit.is_positive() {
            spent
                .ratio_of(self.limit)
                .map(|r| r.clamp(0.0, 1.0))
                .unwrap_or(0.0)
        } else {
            0.0
        };

        ChallengeProgress {
            category: self.category,
            spent,
            limit: self.limit,
            ratio,
        }
    }

    /// Outcome if the week closed with `spent` in the challenged category
    pub fn outcome_for(&self, spent: Money) -> ChallengeOutcome {
        if spent <= self.limit {
            ChallengeOutcome::Succeeded
        } else {
            ChallengeOutcome::Failed
        }
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spend at most {} on {} this week", self.limit, self.category)
    }
}

/// Validation errors for challenges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeValidationError {
    NegativeLimit(Money),
}

impl fmt::Display for ChallengeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit(limit) => {
                write!(f, "Challenge limit cannot be negative, got {}", limit)
            }
        }
    }
}

impl std::error::Error for ChallengeValidationError {}

/// Weekly spending against the active challenge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeProgress {
    pub category: Category,
    pub spent: Money,
    pub limit: Money,
    /// spent/limit clamped to [0, 1]; 0 when the limit is 0
    pub ratio: f64,
}

impl ChallengeProgress {
    pub fn status(&self) -> ChallengeStatus {
        if self.ratio < 1.0 {
            ChallengeStatus::OnTrack
        } else {
            ChallengeStatus::LimitExceeded
        }
    }
}

/// Informational standing of the active challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    OnTrack,
    LimitExceeded,
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeStatus::OnTrack => write!(f, "On track"),
            ChallengeStatus::LimitExceeded => write!(f, "Limit exceeded"),
        }
    }
}

/// Result of closing a challenge week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeOutcome {
    Succeeded,
    Failed,
}

impl fmt::Display for ChallengeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeOutcome::Succeeded => write!(f, "succeeded"),
            ChallengeOutcome::Failed => write!(f, "failed"),
        }
    }
}

/// What `complete_week` hands back before the session resets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekReport {
    /// The closed challenge, with `is_completed` set on success
    pub challenge: Challenge,
    pub spent: Money,
    pub outcome: ChallengeOutcome,
}
