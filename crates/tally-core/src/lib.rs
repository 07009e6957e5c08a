//! Tally Core Library
//!
//! Shared functionality for the Tally expense tracker:
//! - Ledger store: durable expense records in a local SQLite file
//! - Analyzer: totals, breakdowns, trends and insights over a snapshot
//! - Configuration file loading
//! - CSV/JSON export

pub mod analysis;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;

pub use analysis::{
    average_per_category, by_category, by_payment_method, category_percentages,
    detect_insights, detect_patterns, monthly_trend, ranked_categories, summary, top_expenses,
    total_spending, CategoryStats, Insight, MonthlyTotal, PaymentStats, SpendingSummary,
    YearMonth, DEFAULT_TOP_N,
};
pub use config::Config;
pub use db::{Database, ExpenseFilter};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use models::{Category, Expense, NewExpense, PaymentMethod};
