use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::SavingsEntry;

/// One point of the running-total series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeriesPoint {
    pub(crate) date: NaiveDate,
    pub(crate) running_total: Decimal,
}

/// Exact sum of every entry amount. Empty input sums to zero.
pub(crate) fn total_saved(entries: &[SavingsEntry]) -> Decimal {
    entries.iter().map(|e| e.amount).sum()
}

/// Running totals in ascending date order, one point per entry.
///
/// Entries sharing a date keep their input order (the sort is stable), so a
/// caller that passes entries in creation order gets creation-order ties.
pub(crate) fn cumulative_series(entries: &[SavingsEntry]) -> Vec<SeriesPoint> {
    let mut sorted: Vec<&SavingsEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut running = Decimal::ZERO;
    sorted
        .into_iter()
        .map(|e| {
            running += e.amount;
            SeriesPoint {
                date: e.date,
                running_total: running,
            }
        })
        .collect()
}

/// Date of the earliest entry, or `None` when there is no history.
pub(crate) fn since_date(entries: &[SavingsEntry]) -> Option<NaiveDate> {
    entries.iter().map(|e| e.date).min()
}

#[cfg(test)]
#[path = "savings_tests.rs"]
mod tests;
