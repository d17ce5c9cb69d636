use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One dated savings increment. Immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsEntry {
    pub id: Option<i64>,
    pub date: NaiveDate,
    /// Positive for money saved, negative for adjustments.
    pub amount: Decimal,
}

impl SavingsEntry {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            id: None,
            date,
            amount,
        }
    }

    pub fn is_adjustment(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}
