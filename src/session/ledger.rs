//! Transaction ledger and weekly spending store
//!
//! Category totals are a projection of the transaction list and are always
//! computed from it. Weekly spending is a separate accumulator, fed in
//! lockstep with `append` and cleared independently.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{read_lock, write_lock};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money, Transaction};

pub struct LedgerStore {
    transactions: RwLock<Vec<Transaction>>,
    weekly: RwLock<HashMap<Category, Money>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            transactions: RwLock::new(Vec::new()),
            weekly: RwLock::new(HashMap::new()),
        }
    }

    /// Append an already-validated transaction and add it to weekly spending
    ///
    /// Amounts are positive, so the sum of the whole ledger bounds every
    /// category and weekly total. A transaction that would push that sum out
    /// of range is rejected before anything changes.
    pub fn append(&self, transaction: Transaction) -> FinanceResult<()> {
        let mut transactions = write_lock(&self.transactions)?;
        let mut weekly = write_lock(&self.weekly)?;

        let too_large = || {
            FinanceError::Validation(format!(
                "Amount {} is too large for the ledger total",
                transaction.amount
            ))
        };

        transactions
            .iter()
            .try_fold(transaction.amount, |acc, t| acc.checked_add(t.amount))
            .ok_or_else(too_large)?;

        let week_spent = weekly
            .get(&transaction.category)
            .copied()
            .unwrap_or_default()
            .checked_add(transaction.amount)
            .ok_or_else(too_large)?;

        weekly.insert(transaction.category, week_spent);
        transactions.push(transaction);
        Ok(())
    }

    /// Sum of every recorded transaction in `category`
    pub fn total_for(&self, category: Category) -> FinanceResult<Money> {
        let transactions = read_lock(&self.transactions)?;
        Ok(transactions
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.amount)
            .sum())
    }

    /// Weekly spending in `category`, zero if none
    pub fn weekly_total(&self, category: Category) -> FinanceResult<Money> {
        let weekly = read_lock(&self.weekly)?;
        Ok(weekly.get(&category).copied().unwrap_or_default())
    }

    /// Snapshot of the transaction list in insertion order
    pub fn history(&self) -> FinanceResult<TransactionHistory> {
        let transactions = read_lock(&self.transactions)?;
        Ok(TransactionHistory(transactions.as_slice().into()))
    }

    pub fn transaction_count(&self) -> FinanceResult<usize> {
        Ok(read_lock(&self.transactions)?.len())
    }

    /// Clear weekly spending for every category
    pub fn clear_weekly(&self) -> FinanceResult<()> {
        write_lock(&self.weekly)?.clear();
        Ok(())
    }

    /// Clear weekly spending and, if `clear_history`, the transaction list
    pub fn reset_week(&self, clear_history: bool) -> FinanceResult<()> {
        let mut transactions = write_lock(&self.transactions)?;
        let mut weekly = write_lock(&self.weekly)?;

        weekly.clear();
        if clear_history {
            transactions.clear();
        }
        Ok(())
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable snapshot of recorded transactions
///
/// Iteration is lazy and can be restarted any number of times; later
/// ledger changes do not affect an existing snapshot.
#[derive(Debug, Clone)]
pub struct TransactionHistory(Arc<[Transaction]>);

impl TransactionHistory {
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a TransactionHistory {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
