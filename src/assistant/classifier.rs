//! Threshold-based expense classification

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Whether an expense stands out as significant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub significant: bool,
}

impl Classification {
    /// Message shown for this classification
    pub fn describe(&self) -> &'static str {
        if self.significant {
            "This looks like a significant expense, maybe tuition or a big textbook purchase."
        } else {
            "This looks like a regular expense, like a daily campus coffee."
        }
    }
}

/// An expense is significant iff `amount >= threshold`
pub fn classify(amount: Money, threshold: Money) -> Classification {
    Classification {
        significant: amount >= threshold,
    }
}
