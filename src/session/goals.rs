//! Goal store: at most one goal per category, last write wins

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{read_lock, write_lock};
use crate::error::FinanceResult;
use crate::models::{Category, Goal};

pub struct GoalStore {
    goals: RwLock<BTreeMap<Category, Goal>>,
}

impl GoalStore {
    pub fn new() -> Self {
        Self {
            goals: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn get(&self, category: Category) -> FinanceResult<Option<Goal>> {
        Ok(read_lock(&self.goals)?.get(&category).cloned())
    }

    /// All goals in category order
    pub fn all(&self) -> FinanceResult<Vec<Goal>> {
        Ok(read_lock(&self.goals)?.values().cloned().collect())
    }

    /// Insert or replace the goal for its category, returning the previous one
    pub fn upsert(&self, goal: Goal) -> FinanceResult<Option<Goal>> {
        Ok(write_lock(&self.goals)?.insert(goal.category, goal))
    }
}

impl Default for GoalStore {
    fn default() -> Self {
        Self::new()
    }
}
