//! Database access layer with connection pooling and schema setup
//!
//! This module is organized by domain:
//! - `expenses` - Expense CRUD (the ledger store)
//! - `expense_filter` - WHERE clause builder for listing expenses

use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;

use crate::error::Result;

mod expense_filter;
mod expenses;

#[cfg(test)]
mod tests;

pub use expense_filter::{ExpenseFilter, FilterResult};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Ledger store: a pooled handle to the expenses database file
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (creating if needed) the database at `path`
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.display().to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every
    /// pooled connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "tally_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any leftovers from an earlier run with the same pid
        for suffix in ["", "-wal", "-shm"] {
            let mut stale = path.clone().into_os_string();
            stale.push(suffix);
            let _ = std::fs::remove_file(stale);
        }

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Create the schema if it doesn't exist yet
    ///
    /// Safe to run on every open. New columns must be added as nullable or
    /// with a default so rows written by older versions still read back.
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block the writer
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;

            PRAGMA synchronous = NORMAL;

            -- Expenses
            -- AUTOINCREMENT so ids of deleted rows are never handed out again
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date DATE NOT NULL,                        -- YYYY-MM-DD
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,                    -- display label, e.g. 'Food & Dining'
                description TEXT NOT NULL DEFAULT '',
                payment_method TEXT NOT NULL,              -- display label, e.g. 'Credit Card'
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
            CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);
            "#,
        )?;

        debug!("Database ready at {}", self.db_path);
        Ok(())
    }
}
