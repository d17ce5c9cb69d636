use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::format::{
    category_badge, days_label, format_amount, progress_bar, progress_line, truncate,
};
use crate::aggregate;
use crate::db::Database;
use crate::import::{export_series, parse_date, parse_decimal, CsvImporter};
use crate::models::{GoalCategory, GoalDraft, GoalItem};
use crate::tracker::GoalTracker;

const BAR_WIDTH: usize = 20;

/// State shared by every command invocation.
pub(crate) struct Session {
    pub(crate) tracker: GoalTracker<Database>,
    pub(crate) today: NaiveDate,
}

pub(crate) struct Command {
    pub(crate) usage: &'static str,
    pub(crate) description: &'static str,
    pub(crate) run: fn(&[String], &mut Session) -> Result<()>,
}

macro_rules! register_command {
    ($name:expr, $usage:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                usage: $usage,
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("summary", "summary", "Goals overview and savings total", cmd_summary, r);
    register_command!("s", "summary", "Alias for summary", cmd_summary, r);
    register_command!("goals", "goals", "List goals with progress", cmd_goals, r);
    register_command!("g", "goals", "Alias for goals", cmd_goals, r);
    register_command!(
        "add-goal",
        "add-goal <title> <target> [--current N] [--deadline YYYY-MM-DD] [--category C] [--notes T]",
        "Create a goal",
        cmd_add_goal,
        r
    );
    register_command!(
        "edit-goal",
        "edit-goal <id> [--title T] [--target N] [--current N] [--deadline YYYY-MM-DD|none] [--category C] [--notes T]",
        "Edit a goal",
        cmd_edit_goal,
        r
    );
    register_command!(
        "progress",
        "progress <id> <amount>",
        "Set the saved amount for a goal",
        cmd_progress,
        r
    );
    register_command!("delete-goal", "delete-goal <id>", "Delete a goal", cmd_delete_goal, r);
    register_command!(
        "save",
        "save <amount> [--date YYYY-MM-DD]",
        "Record a savings entry (negative for adjustments)",
        cmd_save,
        r
    );
    register_command!("savings", "savings", "Savings history with running total", cmd_savings, r);
    register_command!("import", "import <file.csv>", "Import savings entries from CSV", cmd_import, r);
    register_command!("export", "export [path]", "Export the savings series to CSV", cmd_export, r);
    register_command!("categories", "categories", "List goal categories", cmd_categories, r);

    r
});

/// Flags that take a value; everything else is positional.
const VALUE_FLAGS: &[&str] = &[
    "--title",
    "--target",
    "--current",
    "--deadline",
    "--category",
    "--notes",
    "--date",
];

pub(crate) fn as_cli(args: &[String], db: Database) -> Result<()> {
    let mut session = Session {
        tracker: GoalTracker::new(db),
        today: chrono::Local::now().date_naive(),
    };

    let Some(name) = args.get(1) else {
        return cmd_summary(&[], &mut session);
    };

    match name.as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!(
                "goalkeep {} (schema v{})",
                env!("CARGO_PKG_VERSION"),
                session.tracker.store().schema_version()?
            );
            Ok(())
        }
        other => match COMMANDS.get(other) {
            Some(cmd) => (cmd.run)(&args[2..], &mut session),
            None => {
                print_usage();
                anyhow::bail!("Unknown command: {other}");
            }
        },
    }
}

fn print_usage() {
    println!("goalkeep — local-only savings goal tracker");
    println!();
    println!("Usage: goalkeep [command]");
    println!();
    println!("Commands:");
    println!("  (none)");
    println!("      Same as summary");

    let mut names: Vec<&&str> = COMMANDS.keys().collect();
    names.sort();
    for name in names {
        let cmd = &COMMANDS[*name];
        // Aliases reuse the usage of the command they point at
        if cmd.usage.split_whitespace().next() != Some(*name) {
            continue;
        }
        println!("  {}", cmd.usage);
        println!("      {}", cmd.description);
    }
    println!("  help, -h / version, -V");
    println!("      Show this help / show version");
}

// ── Argument helpers ──────────────────────────────────────────

pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn parse_id(raw: Option<&str>, usage: &str) -> Result<i64> {
    let raw = raw.ok_or_else(|| anyhow::anyhow!("Usage: goalkeep {usage}"))?;
    i64::from_str(raw).with_context(|| format!("Invalid goal id: {raw}"))
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    parse_date(raw, "%Y-%m-%d")
}

/// Accepts a category key or label; anything else is a usage error so a
/// typo does not silently file the goal under "Other".
fn parse_category(raw: &str) -> Result<GoalCategory> {
    let category = GoalCategory::parse(raw);
    if category == GoalCategory::Other && !raw.trim().eq_ignore_ascii_case("other") {
        let keys: Vec<&str> = GoalCategory::all().iter().map(|c| c.as_str()).collect();
        anyhow::bail!("Unknown category '{raw}'. Expected one of: {}", keys.join(", "));
    }
    Ok(category)
}

/// Apply optional flags on top of an existing draft.
pub(crate) fn apply_goal_flags(args: &[String], draft: &mut GoalDraft) -> Result<()> {
    if let Some(title) = flag_value(args, "--title") {
        draft.title = title.to_string();
    }
    if let Some(target) = flag_value(args, "--target") {
        draft.target_amount = parse_decimal(target)?;
    }
    if let Some(current) = flag_value(args, "--current") {
        draft.current_amount = parse_decimal(current)?;
    }
    if let Some(deadline) = flag_value(args, "--deadline") {
        draft.deadline = if deadline.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(parse_day(deadline)?)
        };
    }
    if let Some(category) = flag_value(args, "--category") {
        draft.category = parse_category(category)?;
    }
    if let Some(notes) = flag_value(args, "--notes") {
        draft.notes = Some(notes.to_string());
    }
    Ok(())
}

// ── Goal commands ─────────────────────────────────────────────

fn cmd_summary(_args: &[String], s: &mut Session) -> Result<()> {
    let overview = s.tracker.overview(s.today)?;
    let savings = s.tracker.savings_summary()?;

    println!("goalkeep — {}", s.today.format("%Y-%m-%d"));
    println!("{}", "─".repeat(48));
    println!(
        "  Active goals:    {} ({} completed, {} overdue)",
        overview.active.len(),
        overview.completed.len(),
        overview.overdue
    );
    println!("  Saved so far:    {}", format_amount(overview.totals.total_current));
    println!("  Target:          {}", format_amount(overview.totals.total_target));
    println!("  Still to save:   {}", format_amount(overview.totals.total_remaining));
    println!(
        "  Overall:         {}",
        progress_line(overview.totals.percentage(), BAR_WIDTH)
    );
    println!();
    println!("  Total saved:     {}", format_amount(savings.total_saved));
    match savings.since {
        Some(since) => println!("  Saving since:    {}", since.format("%B %-d, %Y")),
        None => println!("  Saving since:    no savings recorded yet"),
    }
    Ok(())
}

fn print_goal_row(goal: &GoalItem, today: NaiveDate) {
    let pct = aggregate::progress_percentage(goal);
    println!(
        "{:<4} {:<24} {} {:>3}%  {} / {}",
        goal.id.unwrap_or(0),
        truncate(&goal.title, 24),
        progress_bar(pct, BAR_WIDTH),
        pct,
        format_amount(goal.current_amount),
        format_amount(goal.target_amount),
    );
    let mut detail = format!(
        "     {}  ·  {} to go",
        category_badge(goal.category),
        format_amount(aggregate::remaining_amount(goal))
    );
    if !goal.is_completed {
        detail.push_str(&format!(
            "  ·  {}",
            days_label(aggregate::days_remaining(goal, today))
        ));
    }
    println!("{detail}");
    if let Some(notes) = &goal.notes {
        println!("     {}", truncate(notes, 60));
    }
}

fn cmd_goals(_args: &[String], s: &mut Session) -> Result<()> {
    let overview = s.tracker.overview(s.today)?;
    if overview.active.is_empty() && overview.completed.is_empty() {
        println!("No goals yet. Create one with: goalkeep add-goal <title> <target>");
        return Ok(());
    }

    println!(
        "Active ({}) — {} of {} saved, {}%",
        overview.active.len(),
        format_amount(overview.totals.total_current),
        format_amount(overview.totals.total_target),
        overview.totals.percentage()
    );
    println!("{}", "─".repeat(72));
    for goal in &overview.active {
        print_goal_row(goal, s.today);
    }

    if !overview.completed.is_empty() {
        println!();
        println!("Completed ({})", overview.completed.len());
        println!("{}", "─".repeat(72));
        for goal in &overview.completed {
            print_goal_row(goal, s.today);
        }
    }
    Ok(())
}

const ADD_GOAL_USAGE: &str = "add-goal <title> <target> [flags]";

fn cmd_add_goal(args: &[String], s: &mut Session) -> Result<()> {
    let pos = positionals(args);
    let (Some(title), Some(target)) = (pos.first(), pos.get(1)) else {
        anyhow::bail!("Usage: goalkeep {ADD_GOAL_USAGE}");
    };

    let mut draft = GoalDraft::new(title.to_string(), parse_decimal(target)?);
    apply_goal_flags(args, &mut draft)?;
    let goal = s.tracker.create_goal(&draft, s.today)?;

    println!(
        "Created goal {}: {} ({})",
        goal.id.unwrap_or(0),
        goal.title,
        format_amount(goal.target_amount)
    );
    if goal.is_completed {
        println!("Already fully funded");
    }
    Ok(())
}

fn cmd_edit_goal(args: &[String], s: &mut Session) -> Result<()> {
    let id = parse_id(positionals(args).first().copied(), "edit-goal <id> [flags]")?;
    let mut draft = s.tracker.goal(id)?.to_draft();
    apply_goal_flags(args, &mut draft)?;
    let goal = s.tracker.edit_goal(id, &draft)?;
    println!(
        "Updated goal {id}: {} — {}%",
        goal.title,
        aggregate::progress_percentage(&goal)
    );
    Ok(())
}

fn cmd_progress(args: &[String], s: &mut Session) -> Result<()> {
    let pos = positionals(args);
    let id = parse_id(pos.first().copied(), "progress <id> <amount>")?;
    let amount = pos
        .get(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: goalkeep progress <id> <amount>"))
        .and_then(|raw| parse_decimal(raw))?;

    let was_completed = s.tracker.goal(id)?.is_completed;
    let goal = s.tracker.update_progress(id, amount)?;
    println!("{}", progress_report(&goal));
    if goal.is_completed && !was_completed {
        println!("Goal completed!");
    }
    Ok(())
}

fn progress_report(goal: &GoalItem) -> String {
    let mut report = format!(
        "{}: {} of {} {}",
        goal.title,
        format_amount(goal.current_amount),
        format_amount(goal.target_amount),
        progress_line(aggregate::progress_percentage(goal), BAR_WIDTH)
    );
    if !goal.is_completed {
        report.push_str(&format!(
            ", {} to go",
            format_amount(aggregate::remaining_amount(goal))
        ));
    }
    report
}

fn cmd_delete_goal(args: &[String], s: &mut Session) -> Result<()> {
    let id = parse_id(positionals(args).first().copied(), "delete-goal <id>")?;
    let title = s.tracker.goal(id)?.title;
    s.tracker.delete_goal(id)?;
    println!("Deleted goal {id}: {title}");
    Ok(())
}

fn cmd_categories(_args: &[String], _s: &mut Session) -> Result<()> {
    println!("{:<12} {:<20} Color", "Key", "Category");
    println!("{}", "─".repeat(40));
    for category in GoalCategory::all() {
        println!(
            "{:<12} {:<20} {}",
            category.as_str(),
            category_badge(*category),
            category.style().color
        );
    }
    Ok(())
}

// ── Savings commands ──────────────────────────────────────────

fn cmd_save(args: &[String], s: &mut Session) -> Result<()> {
    let amount = positionals(args)
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: goalkeep save <amount> [--date YYYY-MM-DD]"))
        .and_then(|raw| parse_decimal(raw))?;
    let date = match flag_value(args, "--date") {
        Some(raw) => parse_day(raw)?,
        None => s.today,
    };

    let entry = s.tracker.record_saving(date, amount)?;
    let kind = if entry.is_adjustment() { "adjustment" } else { "saving" };
    println!(
        "Recorded {kind} of {} on {}",
        format_amount(entry.amount),
        entry.date.format("%Y-%m-%d")
    );
    Ok(())
}

fn cmd_savings(_args: &[String], s: &mut Session) -> Result<()> {
    let summary = s.tracker.savings_summary()?;
    let Some(since) = summary.since else {
        println!("No savings recorded yet. Add one with: goalkeep save <amount>");
        return Ok(());
    };

    println!(
        "Total saved: {} since {}",
        format_amount(summary.total_saved),
        since.format("%B %-d, %Y")
    );
    println!();
    // Stored entries come back in series order
    let entries = s.tracker.entries()?;
    println!("{:<12} {:>12} {:>14}", "Date", "Amount", "Running total");
    println!("{}", "─".repeat(40));
    for (entry, point) in entries.iter().zip(&summary.series) {
        println!(
            "{:<12} {:>12} {:>14}",
            point.date.format("%Y-%m-%d").to_string(),
            format_amount(entry.amount),
            format_amount(point.running_total)
        );
    }
    Ok(())
}

fn cmd_import(args: &[String], s: &mut Session) -> Result<()> {
    let file_path = positionals(args)
        .first()
        .map(|p| super::shellexpand(p))
        .ok_or_else(|| anyhow::anyhow!("Usage: goalkeep import <file.csv>"))?;
    let path = Path::new(&file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let entries = CsvImporter::read(path)?;
    println!("Parsed {} entries", entries.len());
    let count = s.tracker.import_entries(&entries)?;
    println!(
        "Imported {count} entries ({} in history)",
        s.tracker.store().entry_count()?
    );
    Ok(())
}

fn cmd_export(args: &[String], s: &mut Session) -> Result<()> {
    let output_path = positionals(args)
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(super::shellexpand(a)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(format!("goalkeep-savings-{}.csv", s.today.format("%Y-%m-%d")))
        });

    let summary = s.tracker.savings_summary()?;
    if summary.series.is_empty() {
        println!("No savings to export");
        return Ok(());
    }
    let count = export_series(&output_path, &summary.series)?;
    println!("Exported {count} entries to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
