use rust_decimal::Decimal;

use crate::models::GoalCategory;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Bar filled from the rounded percentage so it always agrees with the label.
pub(crate) fn progress_bar(percentage: u8, width: usize) -> String {
    let pct = usize::from(percentage.min(100));
    let filled = pct * width / 100;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Bar and label from the same rounded percentage.
pub(crate) fn progress_line(percentage: u8, width: usize) -> String {
    format!("{} {percentage}%", progress_bar(percentage, width))
}

pub(crate) fn days_label(days: Option<i64>) -> String {
    match days {
        None => "no deadline".into(),
        Some(0) => "due today".into(),
        Some(1) => "1 day left".into(),
        Some(-1) => "overdue by 1 day".into(),
        Some(d) if d < 0 => format!("overdue by {} days", -d),
        Some(d) => format!("{d} days left"),
    }
}

pub(crate) fn category_badge(category: GoalCategory) -> String {
    format!("{} {category}", category.style().icon)
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
