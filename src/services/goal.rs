//! Goal service
//!
//! Sets per-category spending targets and reports progress against them.
//! A category's progress only ever reads that category's ledger total.

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Goal, GoalProgress, Money};
use crate::session::Session;

/// Service for budget goals
pub struct GoalService<'a> {
    session: &'a Session,
}

impl<'a> GoalService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Set the target for a category, replacing any previous goal
    pub fn set_goal(&self, category: Category, target: Money) -> FinanceResult<Goal> {
        let goal = Goal::new(category, target);

        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let previous = self.session.goals.upsert(goal.clone())?;

        match previous {
            Some(before) => self.session.log_update(
                EntityType::Goal,
                category.to_string(),
                None,
                &before,
                &goal,
                Some(format!("target: {} -> {}", before.target, goal.target)),
            ),
            None => self.session.log_create(
                EntityType::Goal,
                category.to_string(),
                None,
                &goal,
            ),
        }

        Ok(goal)
    }

    pub fn get_goal(&self, category: Category) -> FinanceResult<Option<Goal>> {
        self.session.goals.get(category)
    }

    pub fn has_goal(&self, category: Category) -> FinanceResult<bool> {
        Ok(self.get_goal(category)?.is_some())
    }

    /// Progress of a category against its goal
    ///
    /// Fails with `NoGoalSet` when the category has no goal.
    pub fn progress(&self, category: Category) -> FinanceResult<GoalProgress> {
        let goal = self
            .get_goal(category)?
            .ok_or_else(|| FinanceError::no_goal(category))?;

        let spent = self.session.ledger.total_for(category)?;

        Ok(GoalProgress::compute(
            &goal,
            spent,
            self.session.policy().near_limit_ratio,
        ))
    }

    /// Progress for every configured goal, in category order
    pub fn all_progress(&self) -> FinanceResult<Vec<GoalProgress>> {
        let near_limit_ratio = self.session.policy().near_limit_ratio;

        self.session
            .goals
            .all()?
            .iter()
            .map(|goal| {
                let spent = self.session.ledger.total_for(goal.category)?;
                Ok(GoalProgress::compute(goal, spent, near_limit_ratio))
            })
            .collect()
    }
}
