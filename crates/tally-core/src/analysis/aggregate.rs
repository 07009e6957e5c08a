//! Totals, groupings and rankings

use std::collections::BTreeMap;

use super::types::{CategoryStats, MonthlyTotal, PaymentStats, SpendingSummary, YearMonth};
use crate::models::{Category, Expense, PaymentMethod};

/// Sum in whole cents, so the result doesn't depend on input order and
/// comes back as the nearest `f64` to the exact cent total
fn sum_cents(amounts: &[f64]) -> f64 {
    let cents: i64 = amounts.iter().map(|a| (a * 100.0).round() as i64).sum();
    cents as f64 / 100.0
}

/// Round to 2 decimal places for display
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Collect amounts under the key `key_fn` picks for each expense
fn group_amounts<K, F>(records: &[Expense], key_fn: F) -> BTreeMap<K, Vec<f64>>
where
    K: Ord,
    F: Fn(&Expense) -> K,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for expense in records {
        groups.entry(key_fn(expense)).or_default().push(expense.amount);
    }
    groups
}

/// Sum of every amount; `0.0` for an empty snapshot
///
/// Built from the `by_category` totals in key order, so it always equals
/// `by_category(records).values().map(|s| s.total).sum()` exactly.
pub fn total_spending(records: &[Expense]) -> f64 {
    by_category(records)
        .values()
        .fold(0.0, |acc, s| acc + s.total)
}

/// Total, average and count per category
///
/// Only categories with at least one expense appear.
pub fn by_category(records: &[Expense]) -> BTreeMap<Category, CategoryStats> {
    group_amounts(records, |e| e.category)
        .into_iter()
        .map(|(category, amounts)| {
            let count = amounts.len();
            let total = sum_cents(&amounts);
            (
                category,
                CategoryStats {
                    total,
                    average: total / count as f64,
                    count,
                },
            )
        })
        .collect()
}

/// Categories ordered by total spent, largest first
///
/// Equal totals keep category declaration order.
pub fn ranked_categories(records: &[Expense]) -> Vec<(Category, CategoryStats)> {
    let mut ranked: Vec<_> = by_category(records).into_iter().collect();
    ranked.sort_by(|a, b| b.1.total.total_cmp(&a.1.total).then(a.0.cmp(&b.0)));
    ranked
}

/// Share of the grand total per category, in percent, rounded to 2 places
///
/// Returns an empty map when the grand total is zero (including an empty
/// snapshot) instead of dividing by zero.
pub fn category_percentages(records: &[Expense]) -> BTreeMap<Category, f64> {
    let grand_total = total_spending(records);
    if grand_total <= 0.0 {
        return BTreeMap::new();
    }

    by_category(records)
        .into_iter()
        .map(|(category, stats)| (category, round2(stats.total / grand_total * 100.0)))
        .collect()
}

/// Total and count per payment method
pub fn by_payment_method(records: &[Expense]) -> BTreeMap<PaymentMethod, PaymentStats> {
    group_amounts(records, |e| e.payment_method)
        .into_iter()
        .map(|(method, amounts)| {
            let count = amounts.len();
            (
                method,
                PaymentStats {
                    total: sum_cents(&amounts),
                    count,
                },
            )
        })
        .collect()
}

/// The `n` largest expenses, largest first
///
/// Equal amounts are ordered by earlier date, then lower id. Returns every
/// record when there are fewer than `n`.
pub fn top_expenses(records: &[Expense], n: usize) -> Vec<Expense> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then(a.date.cmp(&b.date))
            .then(a.id.cmp(&b.id))
    });
    sorted.truncate(n);
    sorted
}

/// Spending per calendar month, oldest first
///
/// Months without expenses are skipped, not filled with zeros.
pub fn monthly_trend(records: &[Expense]) -> Vec<MonthlyTotal> {
    group_amounts(records, |e| YearMonth::of(e.date))
        .into_iter()
        .map(|(month, amounts)| {
            let count = amounts.len();
            let total = sum_cents(&amounts);
            MonthlyTotal {
                month,
                total,
                count,
                average: total / count as f64,
            }
        })
        .collect()
}

/// Average expense per category
pub fn average_per_category(records: &[Expense]) -> BTreeMap<Category, f64> {
    by_category(records)
        .into_iter()
        .map(|(category, stats)| (category, stats.average))
        .collect()
}

/// Count, total, average, extremes and large purchases; `None` when empty
pub fn summary(records: &[Expense]) -> Option<SpendingSummary> {
    if records.is_empty() {
        return None;
    }

    let count = records.len();
    let total = total_spending(records);
    let average = total / count as f64;
    let largest = records
        .iter()
        .map(|e| e.amount)
        .fold(f64::NEG_INFINITY, f64::max);
    let smallest = records.iter().map(|e| e.amount).fold(f64::INFINITY, f64::min);
    let large_purchases = records.iter().filter(|e| e.amount > average * 2.0).count();

    Some(SpendingSummary {
        count,
        total,
        average,
        largest,
        smallest,
        large_purchases,
    })
}
