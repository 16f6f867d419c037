//! Savings-goal mutations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use fincast_domain::{Goal, Ledger};

use crate::CoreError;

pub struct GoalService;

impl GoalService {
    pub fn add(
        ledger: &mut Ledger,
        description: &str,
        target_amount: Decimal,
        deadline: Option<NaiveDate>,
    ) -> Result<Uuid, CoreError> {
        if description.trim().is_empty() {
            return Err(CoreError::Validation("goal description is required".into()));
        }
        if target_amount <= Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "goal target {} must be positive",
                target_amount
            )));
        }
        let mut goal = Goal::new(description.trim(), target_amount);
        goal.deadline = deadline;
        Ok(ledger.add_goal(goal))
    }

    /// Updates the user-tracked progress amount. It is intentionally not
    /// derived from ledger activity.
    pub fn set_progress(ledger: &mut Ledger, id: Uuid, current: Decimal) -> Result<(), CoreError> {
        if current < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "goal progress {} must not be negative",
                current
            )));
        }
        let goal = ledger.goal_mut(id).ok_or(CoreError::GoalNotFound(id))?;
        goal.current_amount = current;
        ledger.touch();
        Ok(())
    }

    pub fn set_deadline(
        ledger: &mut Ledger,
        id: Uuid,
        deadline: Option<NaiveDate>,
    ) -> Result<(), CoreError> {
        let goal = ledger.goal_mut(id).ok_or(CoreError::GoalNotFound(id))?;
        goal.deadline = deadline;
        ledger.touch();
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<(), CoreError> {
        let before = ledger.goals.len();
        ledger.goals.retain(|goal| goal.id != id);
        if ledger.goals.len() == before {
            return Err(CoreError::GoalNotFound(id));
        }
        ledger.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tracks_progress_independently_of_ledger() {
        let mut ledger = Ledger::new("Goals");
        let id = GoalService::add(&mut ledger, "Emergency fund", dec!(5000), None).unwrap();
        GoalService::set_progress(&mut ledger, id, dec!(1250)).unwrap();
        assert_eq!(ledger.goal(id).unwrap().current_amount, dec!(1250));

        let err = GoalService::set_progress(&mut ledger, id, dec!(-1)).expect_err("negative");
        assert!(matches!(err, CoreError::InvalidAmount(_)));
    }

    #[test]
    fn remove_unknown_goal_fails() {
        let mut ledger = Ledger::new("Goals");
        let err = GoalService::remove(&mut ledger, Uuid::new_v4()).expect_err("missing");
        assert!(matches!(err, CoreError::GoalNotFound(_)));
    }
}
