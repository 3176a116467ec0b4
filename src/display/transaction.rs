//! Transaction and spending breakdown tables

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::SpendingSummary;
use crate::session::TransactionHistory;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format recorded transactions in the order they were entered
pub fn format_transaction_list(history: &TransactionHistory, symbol: &str) -> String {
    if history.is_empty() {
        return "No transactions recorded yet.".to_string();
    }

    let rows = history.iter().enumerate().map(|(i, txn)| TransactionRow {
        index: i + 1,
        id: txn.id.to_string(),
        category: txn.category.to_string(),
        amount: txn.amount.format_with_symbol(symbol),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format spending per category with each category's share of the total
pub fn format_spending_summary(summary: &SpendingSummary, symbol: &str) -> String {
    if summary.totals.is_empty() {
        return "No transactions added yet. Add some to see your spending breakdown.".to_string();
    }

    let rows = summary.totals.iter().map(|(category, spent)| CategoryRow {
        category: category.to_string(),
        spent: spent.format_with_symbol(symbol),
        share: format!("{:.1}%", summary.share_of(*category) * 100.0),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push_str(&format!("\nTotal spent: {}", summary.total.format_with_symbol(symbol)));
    output
}
