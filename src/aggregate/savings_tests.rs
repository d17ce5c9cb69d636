#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(id: i64, date: NaiveDate, amount: Decimal) -> SavingsEntry {
    SavingsEntry {
        id: Some(id),
        date,
        amount,
    }
}

fn quarter() -> Vec<SavingsEntry> {
    vec![
        entry(1, day(2025, 1, 15), dec!(30)),
        entry(2, day(2025, 2, 15), dec!(60)),
        entry(3, day(2025, 3, 15), dec!(90)),
    ]
}

// ── total_saved ───────────────────────────────────────────────

#[test]
fn test_total_saved_scenario() {
    assert_eq!(total_saved(&quarter()), dec!(180));
}

#[test]
fn test_total_saved_empty_is_zero() {
    assert_eq!(total_saved(&[]), Decimal::ZERO);
}

#[test]
fn test_total_saved_order_independent() {
    let mut entries = quarter();
    entries.reverse();
    assert_eq!(total_saved(&entries), dec!(180));
}

#[test]
fn test_total_saved_includes_adjustments() {
    let mut entries = quarter();
    entries.push(entry(4, day(2025, 3, 20), dec!(-25.50)));
    assert_eq!(total_saved(&entries), dec!(154.50));
}

#[test]
fn test_total_saved_exact_cents() {
    // 0.1 + 0.2 must be exactly 0.3 with decimal arithmetic
    let entries = vec![
        entry(1, day(2025, 1, 1), dec!(0.1)),
        entry(2, day(2025, 1, 2), dec!(0.2)),
    ];
    assert_eq!(total_saved(&entries), dec!(0.3));
}

// ── cumulative_series ─────────────────────────────────────────

#[test]
fn test_cumulative_series_scenario() {
    let series = cumulative_series(&quarter());
    let got: Vec<(NaiveDate, Decimal)> = series.iter().map(|p| (p.date, p.running_total)).collect();
    assert_eq!(
        got,
        vec![
            (day(2025, 1, 15), dec!(30)),
            (day(2025, 2, 15), dec!(90)),
            (day(2025, 3, 15), dec!(180)),
        ]
    );
}

#[test]
fn test_cumulative_series_sorts_unordered_input() {
    let entries = vec![
        entry(3, day(2025, 3, 15), dec!(90)),
        entry(1, day(2025, 1, 15), dec!(30)),
        entry(2, day(2025, 2, 15), dec!(60)),
    ];
    let series = cumulative_series(&entries);
    assert_eq!(series.len(), 3);
    assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(series[0].running_total, dec!(30));
    assert_eq!(series[2].running_total, dec!(180));
}

#[test]
fn test_cumulative_series_last_equals_total() {
    let entries = vec![
        entry(1, day(2024, 12, 1), dec!(320)),
        entry(2, day(2024, 7, 1), dec!(30)),
        entry(3, day(2024, 9, 1), dec!(-40)),
        entry(4, day(2024, 8, 1), dec!(60)),
    ];
    let series = cumulative_series(&entries);
    assert_eq!(series.len(), entries.len());
    assert_eq!(series.last().unwrap().running_total, total_saved(&entries));
}

#[test]
fn test_cumulative_series_same_date_keeps_input_order() {
    let d = day(2025, 5, 1);
    let entries = vec![
        entry(10, day(2025, 4, 1), dec!(5)),
        entry(11, d, dec!(100)),
        entry(12, d, dec!(-30)),
        entry(13, d, dec!(7)),
    ];
    let totals: Vec<Decimal> = cumulative_series(&entries)
        .iter()
        .map(|p| p.running_total)
        .collect();
    assert_eq!(totals, vec![dec!(5), dec!(105), dec!(75), dec!(82)]);
}

#[test]
fn test_cumulative_series_empty() {
    assert!(cumulative_series(&[]).is_empty());
}

#[test]
fn test_cumulative_series_is_repeatable() {
    let entries = quarter();
    assert_eq!(cumulative_series(&entries), cumulative_series(&entries));
}

// ── since_date ────────────────────────────────────────────────

#[test]
fn test_since_date_earliest() {
    let entries = vec![
        entry(1, day(2025, 3, 1), dec!(1)),
        entry(2, day(2024, 11, 30), dec!(1)),
        entry(3, day(2025, 1, 1), dec!(1)),
    ];
    assert_eq!(since_date(&entries), Some(day(2024, 11, 30)));
}

#[test]
fn test_since_date_empty_is_none() {
    assert_eq!(since_date(&[]), None);
}
