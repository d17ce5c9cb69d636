use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::GoalCategory;
use crate::error::{GoalError, Result};

/// Largest amount accepted anywhere: one trillion. Sums over any realistic
/// number of goals or entries stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// A saved amount must be non-negative and at most [`MAX_AMOUNT`].
pub fn check_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(GoalError::invalid_amount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(GoalError::amount_too_large(amount));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalItem {
    pub id: Option<i64>,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub category: GoalCategory,
    pub notes: Option<String>,
    pub created_date: NaiveDate,
    /// Always `current_amount >= target_amount`; see [`GoalItem::sync_completion`].
    pub is_completed: bool,
}

/// User-editable goal fields, validated before they reach a [`GoalItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub category: GoalCategory,
    pub notes: Option<String>,
}

impl GoalDraft {
    pub fn new(title: String, target_amount: Decimal) -> Self {
        Self {
            title,
            target_amount,
            current_amount: Decimal::ZERO,
            deadline: None,
            category: GoalCategory::General,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(GoalError::non_positive_target(self.target_amount));
        }
        if self.target_amount > MAX_AMOUNT {
            return Err(GoalError::amount_too_large(self.target_amount));
        }
        check_amount(self.current_amount)
    }

    fn normalized_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

impl GoalItem {
    /// Build a new, not-yet-stored goal from a validated draft.
    pub fn from_draft(draft: &GoalDraft, created_date: NaiveDate) -> Result<Self> {
        draft.validate()?;
        let mut goal = Self {
            id: None,
            title: draft.title.trim().to_string(),
            target_amount: draft.target_amount,
            current_amount: draft.current_amount,
            deadline: draft.deadline,
            category: draft.category,
            notes: draft.normalized_notes(),
            created_date,
            is_completed: false,
        };
        goal.sync_completion();
        Ok(goal)
    }

    /// Replace the editable fields. `id` and `created_date` are kept.
    pub fn apply_draft(&mut self, draft: &GoalDraft) -> Result<()> {
        draft.validate()?;
        self.title = draft.title.trim().to_string();
        self.target_amount = draft.target_amount;
        self.current_amount = draft.current_amount;
        self.deadline = draft.deadline;
        self.category = draft.category;
        self.notes = draft.normalized_notes();
        self.sync_completion();
        Ok(())
    }

    pub fn to_draft(&self) -> GoalDraft {
        GoalDraft {
            title: self.title.clone(),
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            deadline: self.deadline,
            category: self.category,
            notes: self.notes.clone(),
        }
    }

    /// Recompute `is_completed` from the amounts. Called after every mutation.
    pub fn sync_completion(&mut self) {
        self.is_completed = self.current_amount >= self.target_amount;
    }
}
