//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status) and shared utilities (open_db, build_filter)
//! - `expenses` - Expense commands (add, list, show, delete)
//! - `export` - CSV/JSON export
//! - `reports` - Dashboard and individual reports

pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;

// Re-export command functions for main.rs
pub use self::core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount for display
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}
