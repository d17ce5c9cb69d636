use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum GoalError {
    #[error("Amount must not be negative: {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("Amount exceeds the maximum of {}: {amount}", crate::models::MAX_AMOUNT)]
    AmountTooLarge { amount: Decimal },
    #[error("Target amount must be greater than zero: {amount}")]
    NonPositiveTarget { amount: Decimal },
    #[error("Goal title must not be empty")]
    EmptyTitle,
    #[error("Goal [{id}] was not found")]
    GoalNotFound { id: i64 },
    /// The backing store failed. Distinct from an empty collection.
    #[error("Goal data unavailable: {0:#}")]
    DataUnavailable(anyhow::Error),
}

impl GoalError {
    pub(crate) fn invalid_amount(amount: Decimal) -> Self {
        Self::InvalidAmount { amount }
    }

    pub(crate) fn amount_too_large(amount: Decimal) -> Self {
        Self::AmountTooLarge { amount }
    }

    pub(crate) fn non_positive_target(amount: Decimal) -> Self {
        Self::NonPositiveTarget { amount }
    }

    pub(crate) fn not_found(id: i64) -> Self {
        Self::GoalNotFound { id }
    }
}

pub(crate) type Result<T> = std::result::Result<T, GoalError>;
