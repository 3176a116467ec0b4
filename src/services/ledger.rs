//! Ledger service
//!
//! Records expenses and answers spending queries. Every recorded
//! transaction feeds both the all-time category totals and the weekly
//! spending figures the challenge reads.

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money, Transaction};
use crate::session::{Session, TransactionHistory};

/// Service for recording and querying spending
pub struct LedgerService<'a> {
    session: &'a Session,
}

/// Spending per category, for the breakdown view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingSummary {
    /// Categories with spending, in category order
    pub totals: Vec<(Category, Money)>,
    pub total: Money,
}

impl SpendingSummary {
    /// Share of all spending that went to `category`, 0 when nothing is spent
    pub fn share_of(&self, category: Category) -> f64 {
        self.totals
            .iter()
            .find(|(c, _)| *c == category)
            .and_then(|(_, amount)| amount.ratio_of(self.total))
            .unwrap_or(0.0)
    }
}

impl<'a> LedgerService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Record an expense
    ///
    /// Non-positive amounts are rejected with a validation error and leave
    /// the ledger untouched.
    pub fn record_transaction(&self, category: Category, amount: Money) -> FinanceResult<Transaction> {
        let transaction = Transaction::new(category, amount);

        transaction
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.session.ledger.append(transaction.clone())?;

        self.session.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(category.to_string()),
            &transaction,
        );

        Ok(transaction)
    }

    /// Cumulative spending in a category, zero if nothing recorded
    pub fn total_for(&self, category: Category) -> FinanceResult<Money> {
        self.session.ledger.total_for(category)
    }

    /// Spending in a category since the last challenge reset
    pub fn weekly_total(&self, category: Category) -> FinanceResult<Money> {
        self.session.ledger.weekly_total(category)
    }

    /// All recorded transactions in the order they were entered
    pub fn all_transactions(&self) -> FinanceResult<TransactionHistory> {
        self.session.ledger.history()
    }

    /// Per-category totals for categories with spending
    pub fn category_totals(&self) -> FinanceResult<SpendingSummary> {
        let history = self.session.ledger.history()?;

        let totals: Vec<(Category, Money)> = Category::ALL
            .into_iter()
            .map(|category| {
                let spent: Money = history
                    .iter()
                    .filter(|t| t.category == category)
                    .map(|t| t.amount)
                    .sum();
                (category, spent)
            })
            .filter(|(_, spent)| !spent.is_zero())
            .collect();

        let total = totals.iter().map(|(_, amount)| *amount).sum();

        Ok(SpendingSummary { totals, total })
    }
}
