//! Dashboard and report command implementations
//!
//! Every report loads one snapshot through `ExpenseFilter` and hands it to
//! the analyzer in tally-core. Nothing here computes statistics itself.

use anyhow::Result;
use serde::Serialize;
use tally_core::{
    by_payment_method, category_percentages, detect_insights, monthly_trend, ranked_categories,
    summary, top_expenses, Database, Expense, ExpenseFilter,
};

use super::{money, truncate};

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_heading(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", RULE);
}

fn snapshot(db: &Database, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
    Ok(db.list_expenses(filter)?)
}

fn print_summary(records: &[Expense]) {
    print_heading("📊 Summary");
    let Some(s) = summary(records) else {
        println!("   No expenses recorded.");
        return;
    };
    println!("   Expenses:        {}", s.count);
    println!("   Total spent:     {}", money(s.total));
    println!("   Average expense: {}", money(s.average));
    println!("   Largest:         {}", money(s.largest));
    println!("   Smallest:        {}", money(s.smallest));
    if s.large_purchases > 0 {
        println!(
            "   Large purchases: {} (over twice the average)",
            s.large_purchases
        );
    }
}

fn print_categories(records: &[Expense]) {
    print_heading("🏷️  Spending by Category");
    let ranked = ranked_categories(records);
    if ranked.is_empty() {
        println!("   No expenses recorded.");
        return;
    }
    println!(
        "   {:<18} │ {:>11} │ {:>5} │ {:>10}",
        "Category", "Total", "Count", "Average"
    );
    println!("   ───────────────────┼─────────────┼───────┼───────────");
    for (category, stats) in ranked {
        println!(
            "   {:<18} │ {:>11} │ {:>5} │ {:>10}",
            category.as_str(),
            money(stats.total),
            stats.count,
            money(stats.average)
        );
    }
}

fn print_percentages(records: &[Expense]) {
    print_heading("🥧 Category Share");
    let mut shares: Vec<_> = category_percentages(records).into_iter().collect();
    if shares.is_empty() {
        println!("   No expenses recorded.");
        return;
    }
    shares.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    for (category, pct) in shares {
        // One block per 2.5%
        let bar = "█".repeat((pct / 2.5).round() as usize);
        println!("   {:<18} {:>6.2}% {}", category.as_str(), pct, bar);
    }
}

fn print_payments(records: &[Expense]) {
    print_heading("💳 Payment Methods");
    let methods = by_payment_method(records);
    if methods.is_empty() {
        println!("   No expenses recorded.");
        return;
    }
    println!("   {:<15} │ {:>11} │ {:>5}", "Method", "Total", "Count");
    println!("   ────────────────┼─────────────┼──────");
    for (method, stats) in methods {
        println!(
            "   {:<15} │ {:>11} │ {:>5}",
            method.as_str(),
            money(stats.total),
            stats.count
        );
    }
}

fn print_top(records: &[Expense], n: usize) {
    print_heading(&format!("🔝 Top {} Expenses", n));
    let top = top_expenses(records, n);
    if top.is_empty() {
        println!("   No expenses recorded.");
        return;
    }
    for (rank, expense) in top.iter().enumerate() {
        println!(
            "   {:>2}. {} │ {:>10} │ {:<17} │ {}",
            rank + 1,
            expense.date,
            money(expense.amount),
            expense.category.as_str(),
            truncate(&expense.description, 30)
        );
    }
}

fn print_monthly(records: &[Expense]) {
    print_heading("📅 Monthly Trend");
    let trend = monthly_trend(records);
    if trend.is_empty() {
        println!("   No expenses recorded.");
        return;
    }
    println!(
        "   {:<7} │ {:>11} │ {:>5} │ {:>10}",
        "Month", "Total", "Count", "Average"
    );
    println!("   ────────┼─────────────┼───────┼───────────");
    for month in trend {
        println!(
            "   {:<7} │ {:>11} │ {:>5} │ {:>10}",
            month.month.to_string(),
            money(month.total),
            month.count,
            money(month.average)
        );
    }
}

fn print_patterns(records: &[Expense]) {
    print_heading("🔍 Spending Patterns");
    let insights = detect_insights(records);
    if insights.is_empty() {
        println!("   Not enough data for insights yet.");
        return;
    }
    for insight in insights {
        println!("   • {}", insight);
    }
}

/// Show all seven analysis sections at once
pub fn cmd_dashboard(db: &Database, filter: &ExpenseFilter, top_n: usize) -> Result<()> {
    let records = snapshot(db, filter)?;

    if records.is_empty() {
        if filter.is_empty() {
            println!("No expenses recorded yet. Add one with:");
            println!("  tally add --amount 12.50 --category food --payment cash");
        } else {
            println!("No expenses match the filter.");
        }
        return Ok(());
    }

    println!();
    println!("💰 Expense Dashboard");

    print_summary(&records);
    print_categories(&records);
    print_percentages(&records);
    print_payments(&records);
    print_top(&records, top_n);
    print_monthly(&records);
    print_patterns(&records);

    println!();
    Ok(())
}

pub fn cmd_report_summary(db: &Database, filter: &ExpenseFilter, json: bool) -> Result<()> {
    let records = snapshot(db, filter)?;
    if json {
        return print_json(&summary(&records));
    }
    print_summary(&records);
    Ok(())
}

pub fn cmd_report_categories(db: &Database, filter: &ExpenseFilter, json: bool) -> Result<()> {
    let records = snapshot(db, filter)?;
    if json {
        return print_json(&tally_core::by_category(&records));
    }
    print_categories(&records);
    Ok(())
}

pub fn cmd_report_percentages(db: &Database, filter: &ExpenseFilter, json: bool) -> Result<()> {
    let records = snapshot(db, filter)?;
    if json {
        return print_json(&category_percentages(&records));
    }
    print_percentages(&records);
    Ok(())
}

pub fn cmd_report_payments(db: &Database, filter: &ExpenseFilter, json: bool) -> Result<()> {
    let records = snapshot(db, filter)?;
    if json {
        return print_json(&by_payment_method(&records));
    }
    print_payments(&records);
    Ok(())
}

pub fn cmd_report_top(db: &Database, filter: &ExpenseFilter, n: usize, json: bool) -> Result<()> {
    let records = snapshot(db, filter)?;
    if json {
        return print_json(&top_expenses(&records, n));
    }
    print_top(&records, n);
    Ok(())
}

pub fn cmd_report_monthly(db: &Database, filter: &ExpenseFilter, json: bool) -> Result<()> {
    let records = snapshot(db, filter)?;
    if json {
        return print_json(&monthly_trend(&records));
    }
    print_monthly(&records);
    Ok(())
}

/// JSON form of one insight: its rendered sentence plus the typed detail
#[derive(Serialize)]
struct InsightOutput {
    message: String,
    detail: tally_core::Insight,
}

pub fn cmd_report_patterns(db: &Database, filter: &ExpenseFilter, json: bool) -> Result<()> {
    let records = snapshot(db, filter)?;
    if json {
        let out: Vec<InsightOutput> = detect_insights(&records)
            .into_iter()
            .map(|insight| InsightOutput {
                message: insight.to_string(),
                detail: insight,
            })
            .collect();
        return print_json(&out);
    }
    print_patterns(&records);
    Ok(())
}
