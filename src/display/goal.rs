//! Budget goal progress formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::progress_bar;
use crate::models::{BudgetStatus, GoalProgress};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Warning line for a goal, if its status calls for one
fn warning_line(progress: &GoalProgress, symbol: &str) -> Option<String> {
    let target = progress.target.format_with_symbol(symbol);
    match progress.status {
        BudgetStatus::Reached => Some(format!(
            "Warning! You have reached your {} budget for {}.",
            target, progress.category
        )),
        BudgetStatus::NearLimit { percent } => Some(format!(
            "Heads up! You're at {}% of your {} budget for {}.",
            percent, target, progress.category
        )),
        BudgetStatus::Ok => None,
    }
}

fn remaining_label(progress: &GoalProgress, symbol: &str) -> String {
    if progress.remaining.is_positive() {
        format!("{} remaining", progress.remaining.format_with_symbol(symbol))
    } else {
        "Budget reached!".to_string()
    }
}

/// Format one goal's progress: warning, figures and bar
pub fn format_goal_progress(progress: &GoalProgress, symbol: &str) -> String {
    let mut output = String::new();

    if let Some(warning) = warning_line(progress, symbol) {
        output.push_str(&warning);
        output.push('\n');
    }

    output.push_str(&format!(
        "{}: {} of {} ({})\n",
        progress.category,
        progress.spent.format_with_symbol(symbol),
        progress.target.format_with_symbol(symbol),
        remaining_label(progress, symbol)
    ));
    output.push_str(&progress_bar(progress.ratio, 20));

    output
}

/// Format every goal as a table followed by any warnings
pub fn format_goal_table(progress: &[GoalProgress], symbol: &str) -> String {
    if progress.is_empty() {
        return "No budget goals set. Use 'goal set <category> <amount>' to add one.".to_string();
    }

    let rows = progress.iter().map(|p| GoalRow {
        category: p.category.to_string(),
        spent: p.spent.format_with_symbol(symbol),
        target: p.target.format_with_symbol(symbol),
        remaining: p.remaining.format_with_symbol(symbol),
        status: p.status.to_string(),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();

    for warning in progress.iter().filter_map(|p| warning_line(p, symbol)) {
        output.push('\n');
        output.push_str(&warning);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Goal, Money, DEFAULT_NEAR_LIMIT_RATIO};

    fn progress(spent: i64, target: i64) -> GoalProgress {
        let goal = Goal::new(Category::CampusFood, Money::from_major_minor(target, 0));
        GoalProgress::compute(&goal, Money::from_major_minor(spent, 0), DEFAULT_NEAR_LIMIT_RATIO)
    }

    #[test]
    fn test_near_limit_output() {
        let output = format_goal_progress(&progress(4500, 5000), "₦");
        assert!(output.contains("Heads up! You're at 90% of your ₦5000.00 budget for Campus Food."));
        assert!(output.contains("₦500.00 remaining"));
        assert!(output.contains(" 90%"));
    }

    #[test]
    fn test_reached_output() {
        let output = format_goal_progress(&progress(5100, 5000), "₦");
        assert!(output.starts_with("Warning! You have reached your ₦5000.00 budget"));
        assert!(output.contains("Budget reached!"));
        assert!(output.contains("100%"));
    }

    #[test]
    fn test_ok_output_has_no_warning() {
        let output = format_goal_progress(&progress(100, 5000), "₦");
        assert!(output.starts_with("Campus Food: ₦100.00 of ₦5000.00"));
    }

    #[test]
    fn test_table() {
        assert!(format_goal_table(&[], "₦").starts_with("No budget goals set"));

        let output = format_goal_table(&[progress(5100, 5000)], "$");
        assert!(output.contains("-$100.00"));
        assert!(output.contains("Budget reached"));
        assert!(output.contains("Warning!"));
    }
}
