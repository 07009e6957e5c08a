//! Tally CLI - Personal expense tracker
//!
//! Usage:
//!   tally add -a 12.50 -c food -p cash    Record an expense
//!   tally list --period this-month        List expenses
//!   tally dashboard                       Full analysis dashboard
//!   tally report top -n 10                A single report

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tally_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so reports and exports on stdout stay clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let db_path = config.database_path(cli.db.as_deref());

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Status => commands::cmd_status(&db_path),
        Commands::Add {
            amount,
            category,
            payment,
            date,
            description,
        } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_add(
                &db,
                date.as_deref(),
                amount,
                &category,
                &payment,
                &description,
            )
            .map(|_| ())
        }
        Commands::List { filter, limit } => {
            let db = commands::open_db(&db_path)?;
            let filter = commands::build_filter(&filter)?.limit(limit);
            commands::cmd_list(&db, &filter)
        }
        Commands::Show { id } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_show(&db, id)
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_delete(&db, id).map(|_| ())
        }
        Commands::Dashboard { filter, top } => {
            let db = commands::open_db(&db_path)?;
            let filter = commands::build_filter(&filter)?;
            commands::cmd_dashboard(&db, &filter, top.unwrap_or(config.top_n))
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&db_path)?;
            match report_type {
                ReportType::Summary(args) => commands::cmd_report_summary(
                    &db,
                    &commands::build_filter(&args.filter)?,
                    args.json,
                ),
                ReportType::Categories(args) => commands::cmd_report_categories(
                    &db,
                    &commands::build_filter(&args.filter)?,
                    args.json,
                ),
                ReportType::Percentages(args) => commands::cmd_report_percentages(
                    &db,
                    &commands::build_filter(&args.filter)?,
                    args.json,
                ),
                ReportType::Payments(args) => commands::cmd_report_payments(
                    &db,
                    &commands::build_filter(&args.filter)?,
                    args.json,
                ),
                ReportType::Top { args, limit } => commands::cmd_report_top(
                    &db,
                    &commands::build_filter(&args.filter)?,
                    limit.unwrap_or(config.top_n),
                    args.json,
                ),
                ReportType::Monthly(args) => commands::cmd_report_monthly(
                    &db,
                    &commands::build_filter(&args.filter)?,
                    args.json,
                ),
                ReportType::Patterns(args) => commands::cmd_report_patterns(
                    &db,
                    &commands::build_filter(&args.filter)?,
                    args.json,
                ),
            }
        }
        Commands::Export {
            file,
            format,
            filter,
        } => {
            let db = commands::open_db(&db_path)?;
            let format = format
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let filter = commands::build_filter(&filter)?;
            commands::cmd_export(&db, &filter, format, file.as_deref())
        }
    }
}
