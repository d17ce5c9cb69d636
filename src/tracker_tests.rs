#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::models::{GoalCategory, MAX_AMOUNT};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tracker() -> GoalTracker<Database> {
    GoalTracker::new(Database::open_in_memory().unwrap())
}

fn draft(title: &str, target: Decimal, current: Decimal) -> GoalDraft {
    GoalDraft {
        current_amount: current,
        ..GoalDraft::new(title.into(), target)
    }
}

/// A store whose backend is always down.
struct BrokenStore;

impl GoalStore for BrokenStore {
    fn list_goals(&self) -> anyhow::Result<Vec<GoalItem>> {
        anyhow::bail!("disk unavailable")
    }
    fn get_goal(&self, _id: i64) -> anyhow::Result<Option<GoalItem>> {
        anyhow::bail!("disk unavailable")
    }
    fn create_goal(&mut self, _goal: &GoalItem) -> anyhow::Result<GoalItem> {
        anyhow::bail!("disk unavailable")
    }
    fn update_goal(&mut self, _goal: &GoalItem) -> anyhow::Result<GoalItem> {
        anyhow::bail!("disk unavailable")
    }
    fn delete_goal(&mut self, _id: i64) -> anyhow::Result<bool> {
        anyhow::bail!("disk unavailable")
    }
}

impl SavingsStore for BrokenStore {
    fn list_entries(&self) -> anyhow::Result<Vec<SavingsEntry>> {
        anyhow::bail!("disk unavailable")
    }
    fn append_entry(&mut self, _entry: &SavingsEntry) -> anyhow::Result<SavingsEntry> {
        anyhow::bail!("disk unavailable")
    }
    fn append_entries(&mut self, _entries: &[SavingsEntry]) -> anyhow::Result<usize> {
        anyhow::bail!("disk unavailable")
    }
}

// ── Goals ─────────────────────────────────────────────────────

#[test]
fn test_create_and_fetch() {
    let mut t = tracker();
    let created = t
        .create_goal(&draft("Emergency Fund", dec!(10000), dec!(3500)), day(2025, 1, 1))
        .unwrap();
    let id = created.id.unwrap();
    let fetched = t.goal(id).unwrap();
    assert_eq!(fetched.title, "Emergency Fund");
    assert_eq!(fetched.created_date, day(2025, 1, 1));
    assert!(!fetched.is_completed);
}

#[test]
fn test_create_funded_goal_is_completed() {
    let mut t = tracker();
    let created = t
        .create_goal(&draft("Laptop", dec!(2000), dec!(2000)), day(2025, 1, 1))
        .unwrap();
    assert!(created.is_completed);
}

#[test]
fn test_create_rejects_invalid_draft() {
    let mut t = tracker();
    assert!(matches!(
        t.create_goal(&draft("", dec!(10), dec!(0)), day(2025, 1, 1)),
        Err(GoalError::EmptyTitle)
    ));
    assert!(matches!(
        t.create_goal(&draft("X", dec!(0), dec!(0)), day(2025, 1, 1)),
        Err(GoalError::NonPositiveTarget { .. })
    ));
    assert!(t.overview(day(2025, 1, 1)).unwrap().active.is_empty());
}

#[test]
fn test_goal_not_found() {
    let t = tracker();
    assert!(matches!(t.goal(42), Err(GoalError::GoalNotFound { id: 42 })));
}

#[test]
fn test_update_progress_scenario() {
    let mut t = tracker();
    let id = t
        .create_goal(&draft("Laptop", dec!(2000), dec!(1800)), day(2025, 1, 1))
        .unwrap()
        .id
        .unwrap();

    let updated = t.update_progress(id, dec!(2000)).unwrap();
    assert_eq!(updated.current_amount, dec!(2000));
    assert!(updated.is_completed);

    let stored = t.goal(id).unwrap();
    assert!(stored.is_completed);
}

#[test]
fn test_update_progress_negative_leaves_store_unchanged() {
    let mut t = tracker();
    let id = t
        .create_goal(&draft("Laptop", dec!(2000), dec!(1800)), day(2025, 1, 1))
        .unwrap()
        .id
        .unwrap();
    let before = t.goal(id).unwrap();

    match t.update_progress(id, dec!(-5)) {
        Err(GoalError::InvalidAmount { amount }) => assert_eq!(amount, dec!(-5)),
        other => panic!("expected InvalidAmount, got {other:?}"),
    }
    assert_eq!(t.goal(id).unwrap(), before);
}

#[test]
fn test_update_progress_above_limit_is_rejected() {
    let mut t = tracker();
    let id = t
        .create_goal(&draft("House", MAX_AMOUNT, dec!(0)), day(2025, 1, 1))
        .unwrap()
        .id
        .unwrap();

    t.update_progress(id, MAX_AMOUNT).unwrap();
    let too_much = MAX_AMOUNT + dec!(0.01);
    assert!(matches!(
        t.update_progress(id, too_much),
        Err(GoalError::AmountTooLarge { amount }) if amount == too_much
    ));
    assert_eq!(t.goal(id).unwrap().current_amount, MAX_AMOUNT);
}

#[test]
fn test_overview_with_goals_at_limit() {
    let mut t = tracker();
    for title in ["A", "B", "C"] {
        t.create_goal(&draft(title, MAX_AMOUNT, dec!(0)), day(2025, 1, 1))
            .unwrap();
    }
    let overview = t.overview(day(2025, 1, 2)).unwrap();
    assert_eq!(overview.totals.total_target, MAX_AMOUNT * dec!(3));
    assert_eq!(overview.totals.percentage(), 0);
}

#[test]
fn test_update_progress_unknown_goal() {
    let mut t = tracker();
    assert!(matches!(
        t.update_progress(7, dec!(10)),
        Err(GoalError::GoalNotFound { id: 7 })
    ));
}

#[test]
fn test_edit_goal_recomputes_completion() {
    let mut t = tracker();
    let goal = t
        .create_goal(&draft("Car", dec!(8000), dec!(8000)), day(2025, 1, 1))
        .unwrap();
    assert!(goal.is_completed);

    let mut edit = goal.to_draft();
    edit.target_amount = dec!(12000);
    edit.category = GoalCategory::Car;
    edit.deadline = Some(day(2026, 1, 1));
    let edited = t.edit_goal(goal.id.unwrap(), &edit).unwrap();

    assert!(!edited.is_completed);
    assert_eq!(edited.created_date, day(2025, 1, 1));
    assert_eq!(t.goal(goal.id.unwrap()).unwrap().target_amount, dec!(12000));
}

#[test]
fn test_edit_goal_invalid_keeps_stored() {
    let mut t = tracker();
    let goal = t
        .create_goal(&draft("Car", dec!(8000), dec!(100)), day(2025, 1, 1))
        .unwrap();
    let mut edit = goal.to_draft();
    edit.current_amount = dec!(-1);
    assert!(t.edit_goal(goal.id.unwrap(), &edit).is_err());
    assert_eq!(t.goal(goal.id.unwrap()).unwrap(), goal);
}

#[test]
fn test_delete_goal() {
    let mut t = tracker();
    let id = t
        .create_goal(&draft("Wedding", dec!(20000), dec!(0)), day(2025, 1, 1))
        .unwrap()
        .id
        .unwrap();
    t.delete_goal(id).unwrap();
    assert!(matches!(t.goal(id), Err(GoalError::GoalNotFound { .. })));
    assert!(matches!(
        t.delete_goal(id),
        Err(GoalError::GoalNotFound { .. })
    ));
}

#[test]
fn test_overview_rolls_up_active_goals() {
    let mut t = tracker();
    let today = day(2025, 6, 1);
    t.create_goal(&draft("Emergency Fund", dec!(10000), dec!(3500)), day(2025, 1, 1))
        .unwrap();
    t.create_goal(&draft("Europe Trip", dec!(5000), dec!(4200)), day(2025, 1, 2))
        .unwrap();
    t.create_goal(&draft("New Laptop", dec!(2000), dec!(2000)), day(2025, 1, 3))
        .unwrap();
    let mut late = draft("Pay Off Credit Card", dec!(3500), dec!(1200));
    late.deadline = Some(day(2025, 5, 1));
    t.create_goal(&late, day(2025, 1, 4)).unwrap();

    let overview = t.overview(today).unwrap();
    let titles: Vec<&str> = overview.active.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Pay Off Credit Card", "Europe Trip", "Emergency Fund"]);
    assert_eq!(overview.completed.len(), 1);
    assert_eq!(overview.totals.total_target, dec!(18500));
    assert_eq!(overview.totals.total_current, dec!(8900));
    assert_eq!(overview.totals.total_remaining, dec!(9600));
    assert!((overview.overall_progress - 8900.0 / 18500.0).abs() < 1e-9);
    assert_eq!(overview.overdue, 1);
}

#[test]
fn test_overview_empty() {
    let overview = tracker().overview(day(2025, 1, 1)).unwrap();
    assert!(overview.active.is_empty());
    assert!(overview.completed.is_empty());
    assert_eq!(overview.overall_progress, 0.0);
    assert_eq!(overview.totals, PortfolioTotals::default());
}

// ── Savings ───────────────────────────────────────────────────

#[test]
fn test_savings_summary() {
    let mut t = tracker();
    t.record_saving(day(2025, 3, 15), dec!(90)).unwrap();
    t.record_saving(day(2025, 1, 15), dec!(30)).unwrap();
    t.record_saving(day(2025, 2, 15), dec!(60)).unwrap();

    let summary = t.savings_summary().unwrap();
    assert_eq!(summary.total_saved, dec!(180));
    assert_eq!(summary.since, Some(day(2025, 1, 15)));
    let totals: Vec<Decimal> = summary.series.iter().map(|p| p.running_total).collect();
    assert_eq!(totals, vec![dec!(30), dec!(90), dec!(180)]);
}

#[test]
fn test_savings_summary_empty_has_no_since() {
    let summary = tracker().savings_summary().unwrap();
    assert_eq!(summary.total_saved, Decimal::ZERO);
    assert!(summary.since.is_none());
    assert!(summary.series.is_empty());
}

#[test]
fn test_import_entries() {
    let mut t = tracker();
    let entries = vec![
        SavingsEntry::new(day(2025, 1, 1), dec!(10)),
        SavingsEntry::new(day(2025, 1, 2), dec!(20)),
    ];
    assert_eq!(t.import_entries(&entries).unwrap(), 2);
    assert_eq!(t.entries().unwrap().len(), 2);
}

#[test]
fn test_saving_amount_is_bounded() {
    let mut t = tracker();
    t.record_saving(day(2025, 1, 1), -MAX_AMOUNT).unwrap();
    assert!(matches!(
        t.record_saving(day(2025, 1, 1), MAX_AMOUNT + dec!(1)),
        Err(GoalError::AmountTooLarge { .. })
    ));

    let entries = vec![
        SavingsEntry::new(day(2025, 1, 2), dec!(10)),
        SavingsEntry::new(day(2025, 1, 3), -(MAX_AMOUNT * dec!(2))),
    ];
    assert!(t.import_entries(&entries).is_err());
    assert_eq!(t.entries().unwrap().len(), 1);
}

// ── Store failures ────────────────────────────────────────────

#[test]
fn test_store_failure_is_not_empty_data() {
    let t = GoalTracker::new(BrokenStore);
    assert!(matches!(
        t.overview(day(2025, 1, 1)),
        Err(GoalError::DataUnavailable(_))
    ));
    assert!(matches!(
        t.savings_summary(),
        Err(GoalError::DataUnavailable(_))
    ));
    assert!(matches!(t.goal(1), Err(GoalError::DataUnavailable(_))));
}

#[test]
fn test_store_failure_on_write() {
    let mut t = GoalTracker::new(BrokenStore);
    assert!(matches!(
        t.create_goal(&draft("X", dec!(1), dec!(0)), day(2025, 1, 1)),
        Err(GoalError::DataUnavailable(_))
    ));
    assert!(matches!(
        t.record_saving(day(2025, 1, 1), dec!(1)),
        Err(GoalError::DataUnavailable(_))
    ));
    // Validation still runs first
    assert!(matches!(
        t.update_progress(1, dec!(-1)),
        Err(GoalError::InvalidAmount { .. })
    ));
}

#[test]
fn test_data_unavailable_message_keeps_cause() {
    let t = GoalTracker::new(BrokenStore);
    let err = t.savings_summary().unwrap_err();
    assert!(err.to_string().contains("disk unavailable"));
}
