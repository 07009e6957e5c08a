//! Expense operations

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::expense_filter::ExpenseFilter;
use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, Expense, NewExpense, PaymentMethod};

/// Columns read by every expense query, in `row_to_expense` order
const EXPENSE_COLUMNS: &str = "id, date, amount, category, description, payment_method, created_at";

/// Check a new expense and return its parsed date
fn validate(expense: &NewExpense) -> Result<NaiveDate> {
    let date_str = expense.date.trim();
    if date_str.is_empty() {
        return Err(Error::Validation("date is required".to_string()));
    }
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        Error::Validation(format!("date must be YYYY-MM-DD, got '{}'", date_str))
    })?;

    if !expense.amount.is_finite() || expense.amount <= 0.0 {
        return Err(Error::Validation(format!(
            "amount must be greater than zero, got {}",
            expense.amount
        )));
    }

    if expense.category.trim().is_empty() {
        return Err(Error::Validation("category is required".to_string()));
    }

    if expense.payment_method.trim().is_empty() {
        return Err(Error::Validation("payment method is required".to_string()));
    }

    Ok(date)
}

/// Known labels are stored in canonical form; anything else is kept verbatim
fn canonical_category(raw: &str) -> String {
    let raw = raw.trim();
    raw.parse::<Category>()
        .map(|c| c.as_str().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn canonical_payment_method(raw: &str) -> String {
    let raw = raw.trim();
    raw.parse::<PaymentMethod>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

impl Database {
    /// Record a new expense and return its id
    ///
    /// Fails with `Error::Validation` when the amount isn't positive or a
    /// required field is missing. Ids are never reused, even after deletes.
    pub fn create_expense(&self, expense: &NewExpense) -> Result<i64> {
        let date = validate(expense)?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (date, amount, category, description, payment_method)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                date.to_string(),
                expense.amount,
                canonical_category(&expense.category),
                expense.description.trim(),
                canonical_payment_method(&expense.payment_method),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, amount = expense.amount, "Created expense");
        Ok(id)
    }

    /// Delete an expense by id
    ///
    /// Returns whether a row was removed. Deleting a missing id is not an error.
    pub fn delete_expense(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        debug!(id, removed, "Deleted expense");
        Ok(removed > 0)
    }

    /// List expenses matching `filter`, oldest first (ties by id)
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let built = filter.build();

        let sql = format!(
            "SELECT {} FROM expenses {} {} {}",
            EXPENSE_COLUMNS, built.where_clause, built.order_clause, built.limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(built.params_refs().as_slice(), Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = expenses.len(), ?filter, "Listed expenses");
        Ok(expenses)
    }

    /// Every expense, oldest first - the canonical analyzer input
    pub fn all_expenses(&self) -> Result<Vec<Expense>> {
        self.list_expenses(&ExpenseFilter::new())
    }

    /// Get a single expense by id
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS);
        let expense = conn
            .query_row(&sql, params![id], Self::row_to_expense)
            .optional()?;
        Ok(expense)
    }

    /// Get a single expense by id, failing with `Error::NotFound` if absent
    pub fn require_expense(&self, id: i64) -> Result<Expense> {
        self.get_expense(id)?
            .ok_or_else(|| Error::NotFound(format!("expense {}", id)))
    }

    /// Count expenses matching `filter` (any limit is ignored)
    pub fn count_expenses(&self, filter: &ExpenseFilter) -> Result<i64> {
        let conn = self.conn()?;
        let built = ExpenseFilter {
            limit: None,
            ..*filter
        }
        .build();
        let count: i64 = conn.query_row(
            &built.build_count_query(),
            built.params_refs().as_slice(),
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub(crate) fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
        let date_str: String = row.get(1)?;
        let category_str: String = row.get(3)?;
        let description: Option<String> = row.get(4)?;
        let payment_method_str: String = row.get(5)?;
        let created_at_str: Option<String> = row.get(6)?;

        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Expense {
            id: row.get(0)?,
            date,
            amount: row.get(2)?,
            category: category_str.parse().unwrap_or_default(),
            description: description.unwrap_or_default(),
            payment_method: payment_method_str.parse().unwrap_or_default(),
            // Missing or malformed timestamps fall back to the expense date
            created_at: created_at_str
                .as_deref()
                .and_then(parse_datetime)
                .unwrap_or_else(|| date.and_time(NaiveTime::default()).and_utc()),
        })
    }
}
