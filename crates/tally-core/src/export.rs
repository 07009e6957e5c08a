//! Export of expenses to CSV or JSON
//!
//! Exports take the same `ExpenseFilter` as listing, so a report and the
//! file it was built from always agree.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::db::{Database, ExpenseFilter};
use crate::error::Result;
use crate::models::Expense;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One exported row, with labels spelled out
#[derive(Debug, Clone, Serialize)]
struct ExpenseRow<'a> {
    id: i64,
    date: String,
    amount: f64,
    category: &'static str,
    description: &'a str,
    payment_method: &'static str,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id,
            date: expense.date.to_string(),
            amount: expense.amount,
            category: expense.category.as_str(),
            description: &expense.description,
            payment_method: expense.payment_method.as_str(),
        }
    }
}

/// Write `expenses` to `writer` in the given format
pub fn write_expenses<W: Write>(
    expenses: &[Expense],
    format: ExportFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            // Header comes from the first serialized row; write it explicitly
            // so an empty export is still a valid CSV file
            if expenses.is_empty() {
                csv_writer.write_record([
                    "id",
                    "date",
                    "amount",
                    "category",
                    "description",
                    "payment_method",
                ])?;
            }
            for expense in expenses {
                csv_writer.serialize(ExpenseRow::from(expense))?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            let rows: Vec<ExpenseRow> = expenses.iter().map(ExpenseRow::from).collect();
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

impl Database {
    /// Export the expenses matching `filter`; returns how many were written
    pub fn export_expenses<W: Write>(
        &self,
        filter: &ExpenseFilter,
        format: ExportFormat,
        writer: W,
    ) -> Result<usize> {
        let expenses = self.list_expenses(filter)?;
        write_expenses(&expenses, format, writer)?;
        debug!(count = expenses.len(), %format, "Exported expenses");
        Ok(expenses.len())
    }
}
