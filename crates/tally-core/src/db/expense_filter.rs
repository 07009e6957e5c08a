//! Expense filter builder for constructing dynamic SQL queries
//!
//! Filters combine with AND semantics. An empty filter matches every row.

use chrono::NaiveDate;

use crate::models::Category;

/// Builder for the optional filters accepted by `Database::list_expenses`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Inclusive lower bound on `date`
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on `date`
    pub to: Option<NaiveDate>,
    /// Keep only the first `limit` rows after ordering
    pub limit: Option<i64>,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub where_clause: String,
    /// ORDER BY clause including "ORDER BY" keyword
    pub order_clause: &'static str,
    /// LIMIT clause including "LIMIT" keyword (empty if unbounded)
    pub limit_clause: &'static str,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl ExpenseFilter {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set category filter
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Set lower date bound
    pub fn date_from(mut self, date: Option<NaiveDate>) -> Self {
        self.from = date;
        self
    }

    /// Set upper date bound
    pub fn date_to(mut self, date: Option<NaiveDate>) -> Self {
        self.to = date;
        self
    }

    /// Set both date bounds
    pub fn date_range(self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from(Some(from)).date_to(Some(to))
    }

    /// Set row limit
    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    /// True when no condition would be applied
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.from.is_none() && self.to.is_none()
    }

    /// Build the filter components
    pub fn build(&self) -> FilterResult {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = self.category {
            if category == Category::Other {
                // Unknown stored labels read back as Other, so match them too
                let known: Vec<&'static str> = Category::ALL
                    .iter()
                    .filter(|c| **c != Category::Other)
                    .map(|c| c.as_str())
                    .collect();
                let placeholders = vec!["?"; known.len()].join(", ");
                conditions.push(format!(
                    "(category = ? OR category NOT IN ({}))",
                    placeholders
                ));
                params.push(Box::new(category.as_str()));
                for label in known {
                    params.push(Box::new(label));
                }
            } else {
                conditions.push("category = ?".to_string());
                params.push(Box::new(category.as_str()));
            }
        }

        // Dates are stored as ISO text, so string comparison is chronological
        if let Some(from) = self.from {
            conditions.push("date >= ?".to_string());
            params.push(Box::new(from.to_string()));
        }

        if let Some(to) = self.to {
            conditions.push("date <= ?".to_string());
            params.push(Box::new(to.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match self.limit {
            Some(limit) => {
                params.push(Box::new(limit.max(0)));
                "LIMIT ?"
            }
            None => "",
        };

        FilterResult {
            where_clause,
            order_clause: "ORDER BY date ASC, id ASC",
            limit_clause,
            params,
        }
    }
}

impl FilterResult {
    /// Build a COUNT query (ignores any limit)
    pub fn build_count_query(&self) -> String {
        format!("SELECT COUNT(*) FROM expenses {}", self.where_clause)
    }

    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter() {
        let result = ExpenseFilter::new().build();
        assert!(result.where_clause.is_empty());
        assert!(result.limit_clause.is_empty());
        assert!(result.params.is_empty());
        assert_eq!(result.order_clause, "ORDER BY date ASC, id ASC");
    }

    #[test]
    fn test_combined_filter() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let result = ExpenseFilter::new()
            .category(Some(Category::Shopping))
            .date_range(from, to)
            .build();
        assert_eq!(
            result.where_clause,
            "WHERE category = ? AND date >= ? AND date <= ?"
        );
        assert_eq!(result.params.len(), 3);
    }

    #[test]
    fn test_other_category_matches_unknown_labels() {
        let result = ExpenseFilter::new().category(Some(Category::Other)).build();
        assert_eq!(
            result.where_clause,
            "WHERE (category = ? OR category NOT IN (?, ?, ?, ?, ?, ?))"
        );
        // 'Other' plus the six known labels
        assert_eq!(result.params.len(), 7);
    }

    #[test]
    fn test_limit_is_last_param() {
        let result = ExpenseFilter::new()
            .date_from(NaiveDate::from_ymd_opt(2024, 3, 1))
            .limit(Some(10))
            .build();
        assert_eq!(result.where_clause, "WHERE date >= ?");
        assert_eq!(result.limit_clause, "LIMIT ?");
        assert_eq!(result.params.len(), 2);
    }
}
