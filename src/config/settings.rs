//! User settings
//!
//! Display currency, budget warning threshold, expense classification
//! threshold and session reset policy.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::Money;
use crate::session::BudgetPolicy;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Percentage of a goal at which the near-limit warning starts
    #[serde(default = "default_near_limit_percent")]
    pub near_limit_percent: u8,

    /// Amount at or above which an expense is classified as significant
    #[serde(default = "default_significant_threshold")]
    pub significant_expense_threshold: Money,

    /// Whether closing a challenge week also clears the transaction history
    #[serde(default = "default_true")]
    pub reset_ledger_on_week_close: bool,

    /// Whether mutating operations are written to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₦".to_string()
}

fn default_near_limit_percent() -> u8 {
    80
}

fn default_significant_threshold() -> Money {
    Money::from_major_minor(20_000, 0)
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            near_limit_percent: default_near_limit_percent(),
            significant_expense_threshold: default_significant_threshold(),
            reset_ledger_on_week_close: true,
            audit_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if no file exists
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values that would make the budget rules meaningless
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.near_limit_percent == 0 || self.near_limit_percent > 100 {
            return Err(FinanceError::Config(format!(
                "near_limit_percent must be between 1 and 100, got {}",
                self.near_limit_percent
            )));
        }

        if self.significant_expense_threshold.is_negative() {
            return Err(FinanceError::Config(
                "significant_expense_threshold cannot be negative".into(),
            ));
        }

        Ok(())
    }

    /// The budget rules a session built from these settings follows
    pub fn budget_policy(&self) -> BudgetPolicy {
        BudgetPolicy {
            near_limit_ratio: f64::from(self.near_limit_percent) / 100.0,
            reset_ledger_on_week_close: self.reset_ledger_on_week_close,
        }
    }
}
