//! Result types produced by the analyzer

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Per-category aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStats {
    pub total: f64,
    /// `total / count`
    pub average: f64,
    pub count: usize,
}

/// Per-payment-method aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentStats {
    pub total: f64,
    pub count: usize,
}

/// Calendar month key, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One month of the spending trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

/// Headline numbers for a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub largest: f64,
    pub smallest: f64,
    /// Expenses above twice the average
    pub large_purchases: usize,
}
