//! Custom error types for the finance session
//!
//! Every core operation either succeeds or fails with one of these errors and
//! leaves session state exactly as it was before the call.

use thiserror::Error;

/// The main error type for student finance operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected input: non-positive amounts, negative targets or limits
    #[error("Validation error: {0}")]
    Validation(String),

    /// A budget query against a category that has no goal configured
    #[error("No budget goal set for '{category}'")]
    NoGoalSet { category: String },

    /// A challenge transition attempted from the wrong state
    #[error("Cannot {operation}: {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Category label outside the fixed set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// CSV import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Session state could not be accessed (poisoned lock)
    #[error("Session state error: {0}")]
    State(String),
}

impl FinanceError {
    /// Create a "no goal" error for a category
    pub fn no_goal(category: impl ToString) -> Self {
        Self::NoGoalSet {
            category: category.to_string(),
        }
    }

    /// Create an error for a challenge operation that needs an active challenge
    pub fn no_active_challenge(operation: &'static str) -> Self {
        Self::InvalidState {
            operation,
            state: "no challenge is active",
        }
    }

    /// Create an error for a challenge operation that needs an empty slot
    pub fn challenge_already_active(operation: &'static str) -> Self {
        Self::InvalidState {
            operation,
            state: "a challenge is already active",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a missing-goal error
    pub fn is_no_goal(&self) -> bool {
        matches!(self, Self::NoGoalSet { .. })
    }

    /// Check if this is a wrong-state challenge error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for finance operations
pub type FinanceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_no_goal_error() {
        let err = FinanceError::no_goal("Campus Food");
        assert_eq!(err.to_string(), "No budget goal set for 'Campus Food'");
        assert!(err.is_no_goal());
    }

    #[test]
    fn test_invalid_state_error() {
        let err = FinanceError::no_active_challenge("complete week");
        assert_eq!(err.to_string(), "Cannot complete week: no challenge is active");
        assert!(err.is_invalid_state());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinanceError = io_err.into();
        assert!(matches!(err, FinanceError::Io(_)));
    }
}
