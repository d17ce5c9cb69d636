use anyhow::Result;

use crate::models::{GoalItem, SavingsEntry};

/// Backing collection of a user's goals.
pub(crate) trait GoalStore {
    /// All goals, newest first.
    fn list_goals(&self) -> Result<Vec<GoalItem>>;
    fn get_goal(&self, id: i64) -> Result<Option<GoalItem>>;
    /// Persist a new goal and return it with its assigned id.
    fn create_goal(&mut self, goal: &GoalItem) -> Result<GoalItem>;
    /// Overwrite a stored goal. Fails if the goal has no id or is missing.
    fn update_goal(&mut self, goal: &GoalItem) -> Result<GoalItem>;
    /// Returns `false` when nothing was deleted.
    fn delete_goal(&mut self, id: i64) -> Result<bool>;
}

/// Append-only savings history.
pub(crate) trait SavingsStore {
    /// All entries ordered by date, ties in creation order.
    fn list_entries(&self) -> Result<Vec<SavingsEntry>>;
    fn append_entry(&mut self, entry: &SavingsEntry) -> Result<SavingsEntry>;
    fn append_entries(&mut self, entries: &[SavingsEntry]) -> Result<usize>;
}
