use rust_decimal::Decimal;

use super::{clamped_ratio, ratio_to_f64, ratio_to_percentage, remaining_amount};
use crate::models::GoalItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PortfolioTotals {
    pub(crate) total_target: Decimal,
    pub(crate) total_current: Decimal,
    pub(crate) total_remaining: Decimal,
}

impl PortfolioTotals {
    /// Percentage of the rolled-up totals, consistent with [`overall_progress`].
    pub(crate) fn percentage(&self) -> u8 {
        ratio_to_percentage(clamped_ratio(self.total_current, self.total_target))
    }
}

/// Stable partition into `(active, completed)`.
pub(crate) fn split_by_completion(goals: &[GoalItem]) -> (Vec<GoalItem>, Vec<GoalItem>) {
    goals.iter().cloned().partition(|g| !g.is_completed)
}

pub(crate) fn portfolio_totals(goals: &[GoalItem]) -> PortfolioTotals {
    goals
        .iter()
        .fold(PortfolioTotals::default(), |mut acc, goal| {
            acc.total_target += goal.target_amount;
            acc.total_current += goal.current_amount;
            acc.total_remaining += remaining_amount(goal);
            acc
        })
}

/// Ratio of summed current to summed target, clamped to [0, 1].
///
/// Weighted by goal size: this is not the mean of the per-goal ratios.
pub(crate) fn overall_progress(goals: &[GoalItem]) -> f64 {
    let totals = portfolio_totals(goals);
    ratio_to_f64(clamped_ratio(totals.total_current, totals.total_target))
}

#[cfg(test)]
#[path = "portfolio_tests.rs"]
mod tests;
