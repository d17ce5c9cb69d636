use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::aggregate::SeriesPoint;
use crate::models::{SavingsEntry, MAX_AMOUNT};

/// Where the date and amount live in an imported savings CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvLayout {
    pub(crate) date_column: usize,
    pub(crate) amount_column: usize,
    pub(crate) date_format: String,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_column: 1,
            date_format: "%Y-%m-%d".into(),
        }
    }
}

impl CsvLayout {
    /// Pick columns by header name, falling back to the default positions.
    ///
    /// An exact header match beats a substring match, and the amount is never
    /// taken from the column already chosen for the date.
    pub(crate) fn from_headers(headers: &[String]) -> Self {
        let mut layout = Self::default();
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |needles: &[&str], skip: Option<usize>| {
            let candidates = || (0..names.len()).filter(|i| Some(*i) != skip);
            candidates()
                .find(|&i| needles.contains(&names[i].as_str()))
                .or_else(|| candidates().find(|&i| needles.iter().any(|n| names[i].contains(n))))
        };

        let date = find(&["date"], None);
        if let Some(i) = date {
            layout.date_column = i;
        }
        if let Some(i) = find(&["amount", "saved", "value"], date) {
            layout.amount_column = i;
        } else if layout.amount_column == layout.date_column {
            layout.amount_column = usize::from(layout.date_column == 0);
        }
        layout
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and return headers (if the first row looks like one) + data rows.
    pub(crate) fn preview(path: &Path) -> Result<(Option<Vec<String>>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // Headers don't parse as dates or numbers
        let looks_like_header = all_rows[0].iter().all(|field| {
            let trimmed = field.trim();
            parse_decimal(trimmed).is_err() && parse_date(trimmed, "%Y-%m-%d").is_err()
        });

        if looks_like_header {
            let headers = all_rows.remove(0);
            Ok((Some(headers), all_rows))
        } else {
            Ok((None, all_rows))
        }
    }

    /// Parse data rows into entries. Rows with an empty date are skipped.
    pub(crate) fn parse(rows: &[Vec<String>], layout: &CsvLayout) -> Result<Vec<SavingsEntry>> {
        let mut entries = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let date_str = row
                .get(layout.date_column)
                .map(|s| s.trim())
                .unwrap_or_default();

            if date_str.is_empty() {
                debug!(row = i + 1, "Skipping row without a date");
                continue;
            }

            let date = parse_date(date_str, &layout.date_format)
                .with_context(|| format!("Row {}: failed to parse date '{}'", i + 1, date_str))?;

            let raw_amount = row
                .get(layout.amount_column)
                .map(|s| s.trim())
                .unwrap_or_default();
            let amount = parse_decimal(raw_amount)
                .with_context(|| format!("Row {}: failed to parse amount", i + 1))?;

            entries.push(SavingsEntry::new(date, amount));
        }

        Ok(entries)
    }

    /// Convenience: preview, pick a layout, parse.
    pub(crate) fn read(path: &Path) -> Result<Vec<SavingsEntry>> {
        let (headers, rows) = Self::preview(path)?;
        let layout = headers
            .as_deref()
            .map(CsvLayout::from_headers)
            .unwrap_or_default();
        Self::parse(&rows, &layout)
    }
}

/// Write the cumulative series as `date,amount,running_total`.
///
/// `amount` is the per-point increment, recovered from consecutive totals.
pub(crate) fn export_series(path: &Path, series: &[SeriesPoint]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(["date", "amount", "running_total"])?;

    let mut previous = Decimal::ZERO;
    for point in series {
        let amount = point.running_total - previous;
        previous = point.running_total;
        wtr.write_record([
            point.date.format("%Y-%m-%d").to_string(),
            amount.to_string(),
            point.running_total.to_string(),
        ])?;
    }
    wtr.flush().context("Failed to write CSV file")?;
    Ok(series.len())
}

pub(crate) fn parse_date(s: &str, fmt: &str) -> Result<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
        return Ok(d);
    }
    for fallback in &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fallback) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Empty amount");
    }
    let value = Decimal::from_str(&cleaned)
        .with_context(|| format!("Failed to parse '{}' as decimal", s))?;
    if value.abs() > MAX_AMOUNT {
        anyhow::bail!("Amount out of range: {}", s);
    }
    Ok(value)
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
