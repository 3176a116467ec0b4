//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers write to
//! a caller-supplied writer so the interactive session can be driven from
//! any input source.

pub mod assistant;
pub mod audit;
pub mod session;

pub use assistant::{handle_chat, handle_classify};
pub use audit::handle_audit_command;
pub use session::{run_session, SessionCommand, SessionShell};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money};

/// Resolve a category label typed by the user
pub(crate) fn parse_category(input: &str) -> FinanceResult<Category> {
    input.parse()
}

/// Parse an amount typed by the user
pub(crate) fn parse_amount(input: &str) -> FinanceResult<Money> {
    Money::parse(input).map_err(|e| FinanceError::Validation(format!("Invalid amount: {}", e)))
}

/// List the categories, marking the ones challenges can be set on
pub fn format_categories() -> String {
    let mut output = String::from("Categories:\n");
    for category in Category::ALL {
        let marker = if category.is_challenge_eligible() {
            "  (challenge)"
        } else {
            ""
        };
        output.push_str(&format!("  {}{}\n", category, marker));
    }
    output
}
