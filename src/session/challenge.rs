//! The single challenge slot

use std::sync::RwLock;

use super::{read_lock, write_lock};
use crate::error::FinanceResult;
use crate::models::Challenge;

pub struct ChallengeSlot {
    current: RwLock<Option<Challenge>>,
}

impl ChallengeSlot {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    pub fn get(&self) -> FinanceResult<Option<Challenge>> {
        Ok(read_lock(&self.current)?.clone())
    }

    pub fn is_active(&self) -> FinanceResult<bool> {
        Ok(read_lock(&self.current)?.is_some())
    }

    /// Fill the slot, returning `false` without change if it is occupied
    pub fn try_fill(&self, challenge: Challenge) -> FinanceResult<bool> {
        let mut current = write_lock(&self.current)?;
        if current.is_some() {
            return Ok(false);
        }
        *current = Some(challenge);
        Ok(true)
    }

    /// Empty the slot, returning what was in it
    pub fn take(&self) -> FinanceResult<Option<Challenge>> {
        Ok(write_lock(&self.current)?.take())
    }
}

impl Default for ChallengeSlot {
    fn default() -> Self {
        Self::new()
    }
}
