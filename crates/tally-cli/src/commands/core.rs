//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `build_filter` / `resolve_period` - Turn filter flags into an `ExpenseFilter`
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database location and record count

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Months, NaiveDate};
use tally_core::{total_spending, Category, Database, ExpenseFilter};
use tracing::debug;

use super::money;
use crate::cli::FilterArgs;

/// Open the database, creating its parent directory if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
            debug!(dir = %parent.display(), "Created database directory");
        }
    }
    Database::new(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}

/// Parse a YYYY-MM-DD flag value
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date '{}' (use YYYY-MM-DD)", flag, value))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("Invalid date {}-{}-{}", year, month, day))
}

/// Resolve a period name to an inclusive (from, to) range ending at `today`
pub fn resolve_period(period: &str, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let month_start = ymd(today.year(), today.month(), 1)?;

    match period.to_lowercase().as_str() {
        "this-month" => Ok((month_start, today)),
        "last-month" => {
            let last_day = month_start
                .pred_opt()
                .context("No month before the start of the calendar")?;
            Ok((ymd(last_day.year(), last_day.month(), 1)?, last_day))
        }
        "this-year" => Ok((ymd(today.year(), 1, 1)?, today)),
        "last-30-days" => Ok((today - chrono::Duration::days(30), today)),
        "last-90-days" => Ok((today - chrono::Duration::days(90), today)),
        "last-12-months" => {
            let from = month_start
                .checked_sub_months(Months::new(12))
                .context("Period starts before the calendar")?;
            Ok((from, today))
        }
        "all" => Ok((NaiveDate::MIN, today)),
        _ => anyhow::bail!(
            "Unknown period: {}. Available: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all",
            period
        ),
    }
}

/// Build an `ExpenseFilter` from command-line flags
///
/// Explicit `--from`/`--to` win over `--period`.
pub fn build_filter(args: &FilterArgs) -> Result<ExpenseFilter> {
    let category = args
        .category
        .as_deref()
        .map(|c| c.parse::<Category>().map_err(|e| anyhow::anyhow!(e)))
        .transpose()?;

    let mut from = args
        .from
        .as_deref()
        .map(|d| parse_date(d, "--from"))
        .transpose()?;
    let mut to = args
        .to
        .as_deref()
        .map(|d| parse_date(d, "--to"))
        .transpose()?;

    if let Some(period) = args.period.as_deref() {
        if from.is_none() && to.is_none() {
            let (start, end) = resolve_period(period, Local::now().date_naive())?;
            // "all" only bounds the end
            if start != NaiveDate::MIN {
                from = Some(start);
            }
            to = Some(end);
        }
    }

    if let (Some(f), Some(t)) = (from, to) {
        if f > t {
            anyhow::bail!("--from ({}) is after --to ({})", f, t);
        }
    }

    Ok(ExpenseFilter::new()
        .category(category)
        .date_from(from)
        .date_to(to))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_expenses(&ExpenseFilter::new())?;

    println!("✅ Database ready ({} expenses recorded)", count);
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: tally add --amount 12.50 --category food --payment cash");
    println!("  2. See the analysis: tally dashboard");

    Ok(())
}

pub fn cmd_status(db_path: &Path) -> Result<()> {
    println!();
    println!("📊 Tally Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Database: {}", db_path.display());

    if !db_path.exists() {
        println!("   Size: (database not initialized)");
        println!();
        println!("   Run 'tally init' or 'tally add' to create it.");
        return Ok(());
    }

    if let Ok(metadata) = fs::metadata(db_path) {
        let size_kb = metadata.len() as f64 / 1024.0;
        if size_kb < 1024.0 {
            println!("   Size: {:.1} KB", size_kb);
        } else {
            println!("   Size: {:.1} MB", size_kb / 1024.0);
        }
    }

    match open_db(db_path) {
        Ok(db) => {
            let expenses = db.all_expenses()?;
            println!();
            println!("   Expenses tracked: {}", expenses.len());
            if !expenses.is_empty() {
                println!("   Total spent: {}", money(total_spending(&expenses)));
            }
        }
        Err(e) => {
            println!();
            println!("   ❌ Error opening database: {:#}", e);
        }
    }

    println!();
    Ok(())
}
