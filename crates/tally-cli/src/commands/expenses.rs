//! Expense command implementations

use anyhow::{Context, Result};
use chrono::Local;
use tally_core::{Category, Database, Expense, ExpenseFilter, NewExpense, PaymentMethod};

use super::{money, parse_date, truncate};

/// Record an expense and return its id
///
/// Category and payment method must be one of the known labels (or an alias).
pub fn cmd_add(
    db: &Database,
    date: Option<&str>,
    amount: f64,
    category: &str,
    payment: &str,
    description: &str,
) -> Result<i64> {
    let date = match date {
        Some(d) => parse_date(d, "--date")?,
        None => Local::now().date_naive(),
    };

    let category: Category = category.parse().map_err(|e: String| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!("{}. Available: {}", e, known.join(", "))
    })?;

    let known_methods: Vec<&str> = PaymentMethod::SELECTABLE.iter().map(|m| m.as_str()).collect();
    let payment: PaymentMethod = payment.parse().map_err(|e: String| {
        anyhow::anyhow!("{}. Available: {}", e, known_methods.join(", "))
    })?;
    if !PaymentMethod::SELECTABLE.contains(&payment) {
        anyhow::bail!(
            "Payment method must be one of: {}",
            known_methods.join(", ")
        );
    }

    let new_expense = NewExpense::new(
        date.format("%Y-%m-%d").to_string(),
        amount,
        category.as_str(),
        description.trim(),
        payment.as_str(),
    );
    let id = db
        .create_expense(&new_expense)
        .context("Failed to record expense")?;

    println!(
        "✅ Expense #{} added: {} {} ({}, {})",
        id,
        date,
        money(amount),
        category,
        payment
    );

    Ok(id)
}

fn print_expense_row(expense: &Expense) {
    println!(
        "   {:>5} │ {} │ {:>10} │ {:<17} │ {:<14} │ {}",
        expense.id,
        expense.date,
        money(expense.amount),
        expense.category.as_str(),
        expense.payment_method.as_str(),
        truncate(&expense.description, 30)
    );
}

pub fn cmd_list(db: &Database, filter: &ExpenseFilter) -> Result<()> {
    let expenses = db.list_expenses(filter)?;

    if expenses.is_empty() {
        if filter.is_empty() {
            println!("No expenses recorded yet. Add one with:");
            println!("  tally add --amount 12.50 --category food --payment cash");
        } else {
            println!("No expenses match the filter.");
        }
        return Ok(());
    }

    let total = db.count_expenses(filter)?;

    println!();
    if (expenses.len() as i64) < total {
        println!("📝 Expenses (showing {} of {})", expenses.len(), total);
    } else {
        println!("📝 Expenses ({})", expenses.len());
    }
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in &expenses {
        print_expense_row(expense);
    }

    Ok(())
}

fn print_expense_details(expense: &Expense) {
    println!("   ID:          {}", expense.id);
    println!("   Date:        {}", expense.date);
    println!("   Amount:      {}", money(expense.amount));
    println!("   Category:    {}", expense.category);
    println!("   Payment:     {}", expense.payment_method);
    if !expense.description.is_empty() {
        println!("   Description: {}", expense.description);
    }
    println!(
        "   Recorded:    {}",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

pub fn cmd_show(db: &Database, id: i64) -> Result<()> {
    let expense = db.require_expense(id)?;

    println!();
    println!("🧾 Expense #{}", expense.id);
    println!("   ─────────────────────────────────────────────────────────────");
    print_expense_details(&expense);

    Ok(())
}

/// Delete an expense, returning whether anything was removed
pub fn cmd_delete(db: &Database, id: i64) -> Result<bool> {
    let Some(expense) = db.get_expense(id)? else {
        println!("No expense with id {}. Nothing deleted.", id);
        return Ok(false);
    };

    println!();
    println!("🗑️  Deleting expense #{}", expense.id);
    println!("   ─────────────────────────────────────────────────────────────");
    print_expense_details(&expense);

    let deleted = db.delete_expense(id)?;
    if deleted {
        println!();
        println!("✅ Expense #{} deleted", id);
    }

    Ok(deleted)
}
