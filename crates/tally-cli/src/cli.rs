//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

/// Tally - Track expenses and see where the money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal expense tracker with spending analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    ///
    /// Falls back to `database` in the config file, then to
    /// tally.db in the platform data directory.
    #[arg(long, env = "TALLY_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: <data dir>/tally/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// At least one row, matching the `top_n` config rule
fn top_count() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..)
}

/// Filters shared by listing, reports and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only this category (e.g. "Food & Dining", food, bills)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Named period: this-month, last-month, this-year, last-30-days,
    /// last-90-days, last-12-months, all (ignored when --from/--to are given)
    #[arg(long)]
    pub period: Option<String>,
}

/// Options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a new expense
    Add {
        /// Amount spent (must be positive)
        #[arg(short, long)]
        amount: f64,

        /// Category: Food & Dining, Transportation, Shopping, Entertainment,
        /// Bills & Utilities, Healthcare, Other
        #[arg(short, long)]
        category: String,

        /// Payment method: Cash, Credit Card, Debit Card, Digital Wallet
        #[arg(short, long)]
        payment: String,

        /// Date of the expense (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },

    /// List expenses, oldest first
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Show a single expense
    Show {
        /// Expense ID
        id: i64,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Show the full analysis dashboard
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of top expenses to show (default from config, else 5)
        #[arg(long, value_parser = top_count())]
        top: Option<usize>,
    },

    /// Generate a single report
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export expenses to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format: csv or json
        #[arg(long, default_value = "csv")]
        format: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show database location and record count
    Status,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Count, total, average and extremes
    Summary(ReportArgs),

    /// Total, count and average per category
    Categories(ReportArgs),

    /// Share of total spending per category
    Percentages(ReportArgs),

    /// Total and count per payment method
    Payments(ReportArgs),

    /// Largest expenses
    Top {
        #[command(flatten)]
        args: ReportArgs,

        /// Number of expenses (default from config, else 5)
        #[arg(short = 'n', long, value_parser = top_count())]
        limit: Option<usize>,
    },

    /// Spending per month
    Monthly(ReportArgs),

    /// Spending patterns and insights
    Patterns(ReportArgs),
}
