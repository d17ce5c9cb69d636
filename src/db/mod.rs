mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::models::*;
use crate::store::{GoalStore, SavingsStore};

const DATE_FORMAT: &str = "%Y-%m-%d";

const GOAL_COLUMNS: &str = "id, title, target_amount, current_amount, deadline, category, notes, created_date, is_completed";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        debug!(path = %path.display(), "Opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            info!(version = schema::CURRENT_VERSION, "Created fresh schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                info!(from_version, "Applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    pub(crate) fn entry_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM savings_entries", [], |row| row.get(0))?)
    }
}

// ── Row mapping ───────────────────────────────────────────────

fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn date_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_date_column(row: &Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(_) => date_column(row, idx).map(Some),
        None => Ok(None),
    }
}

fn goal_from_row(row: &Row) -> rusqlite::Result<GoalItem> {
    Ok(GoalItem {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        target_amount: decimal_column(row, 2)?,
        current_amount: decimal_column(row, 3)?,
        deadline: optional_date_column(row, 4)?,
        category: GoalCategory::parse(&row.get::<_, String>(5)?),
        notes: row.get(6)?,
        created_date: date_column(row, 7)?,
        is_completed: row.get(8)?,
    })
}

fn entry_from_row(row: &Row) -> rusqlite::Result<SavingsEntry> {
    Ok(SavingsEntry {
        id: Some(row.get(0)?),
        date: date_column(row, 1)?,
        amount: decimal_column(row, 2)?,
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ── Goals ─────────────────────────────────────────────────────

impl GoalStore for Database {
    fn list_goals(&self) -> Result<Vec<GoalItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals ORDER BY created_date DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], goal_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read goals")
    }

    fn get_goal(&self, id: i64) -> Result<Option<GoalItem>> {
        let result = self.conn.query_row(
            &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1"),
            params![id],
            goal_from_row,
        );
        match result {
            Ok(g) => Ok(Some(g)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read goal {id}")),
        }
    }

    fn create_goal(&mut self, goal: &GoalItem) -> Result<GoalItem> {
        self.conn.execute(
            "INSERT INTO goals (title, target_amount, current_amount, deadline, category, notes, created_date, is_completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                goal.title,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline.map(format_date),
                goal.category.as_str(),
                goal.notes,
                format_date(goal.created_date),
                goal.is_completed,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, title = %goal.title, "Inserted goal");
        Ok(GoalItem {
            id: Some(id),
            ..goal.clone()
        })
    }

    fn update_goal(&mut self, goal: &GoalItem) -> Result<GoalItem> {
        let id = goal
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a goal without an id"))?;
        let changed = self.conn.execute(
            "UPDATE goals SET title = ?1, target_amount = ?2, current_amount = ?3, deadline = ?4,
                    category = ?5, notes = ?6, is_completed = ?7
             WHERE id = ?8",
            params![
                goal.title,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline.map(format_date),
                goal.category.as_str(),
                goal.notes,
                goal.is_completed,
                id,
            ],
        )?;
        if changed == 0 {
            anyhow::bail!("Goal {id} not found");
        }
        debug!(id, "Updated goal");
        Ok(goal.clone())
    }

    fn delete_goal(&mut self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

// ── Savings ───────────────────────────────────────────────────

impl SavingsStore for Database {
    fn list_entries(&self) -> Result<Vec<SavingsEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, amount FROM savings_entries ORDER BY date ASC, id ASC")?;
        let rows = stmt.query_map([], entry_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read savings entries")
    }

    fn append_entry(&mut self, entry: &SavingsEntry) -> Result<SavingsEntry> {
        self.conn.execute(
            "INSERT INTO savings_entries (date, amount) VALUES (?1, ?2)",
            params![format_date(entry.date), entry.amount.to_string()],
        )?;
        Ok(SavingsEntry {
            id: Some(self.conn.last_insert_rowid()),
            ..entry.clone()
        })
    }

    fn append_entries(&mut self, entries: &[SavingsEntry]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for entry in entries {
            tx.execute(
                "INSERT INTO savings_entries (date, amount) VALUES (?1, ?2)",
                params![format_date(entry.date), entry.amount.to_string()],
            )?;
        }
        tx.commit()?;
        debug!(count = entries.len(), "Appended savings entries");
        Ok(entries.len())
    }
}
