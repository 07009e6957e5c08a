//! Analyzer - statistics over a snapshot of expenses
//!
//! Every function here is pure: it takes a slice of expenses (usually
//! `Database::all_expenses()` or a filtered list) and recomputes from
//! scratch. Nothing is cached and nothing touches the store.
//!
//! ## Empty input
//!
//! An empty snapshot is always valid:
//! - totals are `0.0`
//! - grouped results are empty maps/lists
//! - `category_percentages` is empty (there is no total to divide by)
//! - `summary` is `None`
//! - `detect_patterns` is empty
//!
//! Categories and payment methods outside the closed sets have already
//! been folded into their `Other` variants by the store.

mod aggregate;
mod patterns;
mod types;

pub use aggregate::{
    average_per_category, by_category, by_payment_method, category_percentages, monthly_trend,
    ranked_categories, summary, top_expenses, total_spending,
};
pub use patterns::{detect_insights, detect_patterns, Insight};
pub use types::{CategoryStats, MonthlyTotal, PaymentStats, SpendingSummary, YearMonth};

/// Default number of rows for `top_expenses`
pub const DEFAULT_TOP_N: usize = 5;
