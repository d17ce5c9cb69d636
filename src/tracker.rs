use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::aggregate::{self, PortfolioTotals, SeriesPoint};
use crate::error::{GoalError, Result};
use crate::models::{check_amount, GoalDraft, GoalItem, SavingsEntry, MAX_AMOUNT};
use crate::store::{GoalStore, SavingsStore};

/// Everything the goals screen needs, computed from one store read.
#[derive(Debug, Clone)]
pub(crate) struct GoalsOverview {
    pub(crate) active: Vec<GoalItem>,
    pub(crate) completed: Vec<GoalItem>,
    /// Totals over `active` only.
    pub(crate) totals: PortfolioTotals,
    pub(crate) overall_progress: f64,
    pub(crate) overdue: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct SavingsSummary {
    pub(crate) total_saved: Decimal,
    pub(crate) since: Option<NaiveDate>,
    pub(crate) series: Vec<SeriesPoint>,
}

/// Goal and savings operations over an injected store.
pub(crate) struct GoalTracker<S> {
    store: S,
}

impl<S> GoalTracker<S> {
    pub(crate) fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

impl<S: GoalStore> GoalTracker<S> {
    pub(crate) fn overview(&self, today: NaiveDate) -> Result<GoalsOverview> {
        let goals = self
            .store
            .list_goals()
            .map_err(GoalError::DataUnavailable)?;
        let (active, completed) = aggregate::split_by_completion(&goals);
        let overdue = active
            .iter()
            .filter(|g| aggregate::is_overdue(g, today))
            .count();
        Ok(GoalsOverview {
            totals: aggregate::portfolio_totals(&active),
            overall_progress: aggregate::overall_progress(&active),
            overdue,
            active,
            completed,
        })
    }

    pub(crate) fn goal(&self, id: i64) -> Result<GoalItem> {
        self.store
            .get_goal(id)
            .map_err(GoalError::DataUnavailable)?
            .ok_or_else(|| GoalError::not_found(id))
    }

    pub(crate) fn create_goal(&mut self, draft: &GoalDraft, today: NaiveDate) -> Result<GoalItem> {
        let goal = GoalItem::from_draft(draft, today)?;
        let stored = self
            .store
            .create_goal(&goal)
            .map_err(GoalError::DataUnavailable)?;
        info!(id = ?stored.id, title = %stored.title, "Goal created");
        Ok(stored)
    }

    pub(crate) fn edit_goal(&mut self, id: i64, draft: &GoalDraft) -> Result<GoalItem> {
        let mut goal = self.goal(id)?;
        goal.apply_draft(draft)?;
        let stored = self
            .store
            .update_goal(&goal)
            .map_err(GoalError::DataUnavailable)?;
        info!(id, "Goal edited");
        Ok(stored)
    }

    /// Set the absolute saved amount for a goal. Invalid amounts are
    /// rejected before the store is touched.
    pub(crate) fn update_progress(&mut self, id: i64, new_amount: Decimal) -> Result<GoalItem> {
        check_amount(new_amount)?;
        let mut goal = self.goal(id)?;
        aggregate::update_progress(&mut goal, new_amount)?;
        let stored = self
            .store
            .update_goal(&goal)
            .map_err(GoalError::DataUnavailable)?;
        info!(id, amount = %new_amount, completed = stored.is_completed, "Goal progress updated");
        Ok(stored)
    }

    pub(crate) fn delete_goal(&mut self, id: i64) -> Result<()> {
        let deleted = self
            .store
            .delete_goal(id)
            .map_err(GoalError::DataUnavailable)?;
        if !deleted {
            warn!(id, "Delete requested for unknown goal");
            return Err(GoalError::not_found(id));
        }
        info!(id, "Goal deleted");
        Ok(())
    }
}

impl<S: SavingsStore> GoalTracker<S> {
    pub(crate) fn savings_summary(&self) -> Result<SavingsSummary> {
        let entries = self
            .store
            .list_entries()
            .map_err(GoalError::DataUnavailable)?;
        Ok(SavingsSummary {
            total_saved: aggregate::total_saved(&entries),
            since: aggregate::since_date(&entries),
            series: aggregate::cumulative_series(&entries),
        })
    }

    pub(crate) fn entries(&self) -> Result<Vec<SavingsEntry>> {
        self.store
            .list_entries()
            .map_err(GoalError::DataUnavailable)
    }

    pub(crate) fn record_saving(&mut self, date: NaiveDate, amount: Decimal) -> Result<SavingsEntry> {
        check_entry_amount(amount)?;
        let entry = self
            .store
            .append_entry(&SavingsEntry::new(date, amount))
            .map_err(GoalError::DataUnavailable)?;
        info!(id = ?entry.id, %date, %amount, "Savings entry recorded");
        Ok(entry)
    }

    pub(crate) fn import_entries(&mut self, entries: &[SavingsEntry]) -> Result<usize> {
        for entry in entries {
            check_entry_amount(entry.amount)?;
        }
        let count = self
            .store
            .append_entries(entries)
            .map_err(GoalError::DataUnavailable)?;
        info!(count, "Savings entries imported");
        Ok(count)
    }
}

/// Entries may be negative adjustments, so only the magnitude is bounded.
fn check_entry_amount(amount: Decimal) -> Result<()> {
    if amount.abs() > MAX_AMOUNT {
        return Err(GoalError::amount_too_large(amount));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
