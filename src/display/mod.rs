//! Display formatting for terminal output
//!
//! Turns session values into text. Nothing here reads or changes session
//! state; callers pass in what to render and the currency symbol to use.

pub mod challenge;
pub mod goal;
pub mod transaction;

pub use challenge::{format_challenge_progress, format_week_report};
pub use goal::{format_goal_progress, format_goal_table};
pub use transaction::{format_spending_summary, format_transaction_list};

/// Render a `[#####-----] 50%` bar for a ratio in [0, 1]
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        ratio * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 10), "[----------]   0%");
        assert_eq!(progress_bar(0.5, 10), "[#####-----]  50%");
        assert_eq!(progress_bar(1.0, 4), "[####] 100%");
        assert_eq!(progress_bar(3.0, 4), "[####] 100%");
    }
}
