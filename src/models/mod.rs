mod goal;
mod goal_category;
mod savings_entry;

pub use goal::{check_amount, GoalDraft, GoalItem, MAX_AMOUNT};
pub use goal_category::GoalCategory;
pub use savings_entry::SavingsEntry;
