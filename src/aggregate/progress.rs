use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use super::{clamped_ratio, ratio_to_f64, ratio_to_percentage};
use crate::error::Result;
use crate::models::{check_amount, GoalItem};

/// Saved fraction of the target, always finite and in [0, 1].
pub(crate) fn progress(goal: &GoalItem) -> f64 {
    ratio_to_f64(clamped_ratio(goal.current_amount, goal.target_amount))
}

/// `progress` as a whole percentage, rounded half-up.
pub(crate) fn progress_percentage(goal: &GoalItem) -> u8 {
    ratio_to_percentage(clamped_ratio(goal.current_amount, goal.target_amount))
}

pub(crate) fn remaining_amount(goal: &GoalItem) -> Decimal {
    (goal.target_amount - goal.current_amount).max(Decimal::ZERO)
}

/// Whole days from `today` until the deadline. Negative when overdue.
pub(crate) fn days_remaining(goal: &GoalItem, today: NaiveDate) -> Option<i64> {
    goal.deadline
        .map(|deadline| deadline.signed_duration_since(today).num_days())
}

/// Past its deadline and still not funded.
pub(crate) fn is_overdue(goal: &GoalItem, today: NaiveDate) -> bool {
    !goal.is_completed && days_remaining(goal, today).is_some_and(|d| d < 0)
}

/// Set an absolute saved amount and recompute completion.
///
/// A negative or out-of-range amount is rejected and leaves the goal untouched.
pub(crate) fn update_progress(goal: &mut GoalItem, new_amount: Decimal) -> Result<()> {
    check_amount(new_amount)?;
    let was_completed = goal.is_completed;
    goal.current_amount = new_amount;
    goal.sync_completion();

    if goal.is_completed && !was_completed {
        info!(title = %goal.title, "Goal completed");
    }
    Ok(())
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
