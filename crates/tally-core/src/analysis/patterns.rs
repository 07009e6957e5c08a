//! Spending pattern heuristics
//!
//! A fixed battery of checks, run in order. Each yields at most one
//! insight and none of them depends on another having fired.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::aggregate::{by_category, by_payment_method, monthly_trend, total_spending};
use super::types::YearMonth;
use crate::models::{Category, Expense, PaymentMethod};

/// A derived observation about a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Category with the most expenses
    MostFrequentCategory { category: Category, count: usize },
    /// Category with the largest total
    HighestSpendingCategory { category: Category, total: f64 },
    /// Total spread over the inclusive span from first to last expense date
    DailyAverage { average: f64, days: i64 },
    /// Latest month against the month before it (both with spending)
    MonthOverMonth {
        previous: YearMonth,
        current: YearMonth,
        previous_total: f64,
        current_total: f64,
        change_pct: f64,
    },
    /// Payment method carrying the largest total
    DominantPaymentMethod { method: PaymentMethod, total: f64 },
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MostFrequentCategory { category, count } => write!(
                f,
                "Most frequent expense category: {} ({} {})",
                category,
                count,
                if *count == 1 { "expense" } else { "expenses" }
            ),
            Self::HighestSpendingCategory { category, total } => {
                write!(f, "Highest spending category: {} (${:.2})", category, total)
            }
            Self::DailyAverage { average, days } => write!(
                f,
                "Average daily spending: ${:.2} over {} {}",
                average,
                days,
                if *days == 1 { "day" } else { "days" }
            ),
            Self::MonthOverMonth {
                previous,
                current,
                change_pct,
                ..
            } => {
                if *change_pct > 0.0 {
                    write!(
                        f,
                        "Spending increased {:.1}% from {} to {}",
                        change_pct, previous, current
                    )
                } else if *change_pct < 0.0 {
                    write!(
                        f,
                        "Spending decreased {:.1}% from {} to {}",
                        change_pct.abs(),
                        previous,
                        current
                    )
                } else {
                    write!(f, "Spending unchanged from {} to {}", previous, current)
                }
            }
            Self::DominantPaymentMethod { method, total } => {
                write!(f, "Top payment method by spending: {} (${:.2})", method, total)
            }
        }
    }
}

/// First key holding the largest value; ties go to the earlier key
fn first_max<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Option<(K, V)>
where
    K: Copy,
    V: Copy + PartialOrd,
{
    let mut best: Option<(K, V)> = None;
    for (key, value) in items {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((key, value)),
        }
    }
    best
}

fn most_frequent_category(records: &[Expense]) -> Option<Insight> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for expense in records {
        *counts.entry(expense.category).or_default() += 1;
    }
    first_max(counts).map(|(category, count)| Insight::MostFrequentCategory { category, count })
}

fn highest_spending_category(records: &[Expense]) -> Option<Insight> {
    first_max(
        by_category(records)
            .into_iter()
            .map(|(category, stats)| (category, stats.total)),
    )
    .map(|(category, total)| Insight::HighestSpendingCategory { category, total })
}

fn daily_average(records: &[Expense]) -> Option<Insight> {
    let first = records.iter().map(|e| e.date).min()?;
    let last = records.iter().map(|e| e.date).max()?;
    let days = (last - first).num_days() + 1;
    Some(Insight::DailyAverage {
        average: total_spending(records) / days as f64,
        days,
    })
}

fn month_over_month(records: &[Expense]) -> Option<Insight> {
    let trend = monthly_trend(records);
    let [.., previous, current] = trend.as_slice() else {
        return None;
    };
    if previous.total <= 0.0 {
        return None;
    }

    Some(Insight::MonthOverMonth {
        previous: previous.month,
        current: current.month,
        previous_total: previous.total,
        current_total: current.total,
        change_pct: (current.total - previous.total) / previous.total * 100.0,
    })
}

fn dominant_payment_method(records: &[Expense]) -> Option<Insight> {
    first_max(
        by_payment_method(records)
            .into_iter()
            .map(|(method, stats)| (method, stats.total)),
    )
    .map(|(method, total)| Insight::DominantPaymentMethod { method, total })
}

/// Run every heuristic in order and keep the ones that apply
///
/// Order: most frequent category, highest-spending category, daily
/// average, month-over-month change, dominant payment method. An empty
/// snapshot yields no insights.
pub fn detect_insights(records: &[Expense]) -> Vec<Insight> {
    if records.is_empty() {
        return Vec::new();
    }

    let checks: [fn(&[Expense]) -> Option<Insight>; 5] = [
        most_frequent_category,
        highest_spending_category,
        daily_average,
        month_over_month,
        dominant_payment_method,
    ];

    checks.iter().filter_map(|check| check(records)).collect()
}

/// Human-readable insight lines, in heuristic order
pub fn detect_patterns(records: &[Expense]) -> Vec<String> {
    detect_insights(records)
        .iter()
        .map(ToString::to_string)
        .collect()
}
