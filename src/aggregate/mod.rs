//! Pure derivations over goals and savings history.
//!
//! Nothing in here touches a store or a clock: callers pass the data and the
//! reference date in, and get plain values back.

mod portfolio;
mod progress;
mod savings;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub(crate) use portfolio::{overall_progress, portfolio_totals, split_by_completion, PortfolioTotals};
pub(crate) use progress::{
    days_remaining, is_overdue, progress, progress_percentage, remaining_amount, update_progress,
};
pub(crate) use savings::{cumulative_series, since_date, total_saved, SeriesPoint};

/// `part / whole` clamped to [0, 1]. A non-positive `whole` yields zero
/// instead of an error so a malformed goal renders as 0% progress.
pub(crate) fn clamped_ratio(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let part = part.max(Decimal::ZERO);
    part.checked_div(whole)
        .unwrap_or(Decimal::ONE)
        .min(Decimal::ONE)
}

/// Whole percentage of a [0, 1] ratio, rounded half-up.
pub(crate) fn ratio_to_percentage(ratio: Decimal) -> u8 {
    (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
}

pub(crate) fn ratio_to_f64(ratio: Decimal) -> f64 {
    ratio.to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
}
