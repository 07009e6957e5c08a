//! Export command implementation

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{Database, ExpenseFilter, ExportFormat};

/// Export matching expenses to `file`, or to stdout when no file is given
pub fn cmd_export(
    db: &Database,
    filter: &ExpenseFilter,
    format: ExportFormat,
    file: Option<&Path>,
) -> Result<()> {
    match file {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let count = db
                .export_expenses(filter, format, BufWriter::new(out))
                .context("Failed to export expenses")?;
            // Confirmation goes to stderr so piping the file path stays clean
            eprintln!(
                "✅ Exported {} expenses to {} ({})",
                count,
                path.display(),
                format
            );
        }
        None => {
            let stdout = io::stdout();
            db.export_expenses(filter, format, stdout.lock())
                .context("Failed to export expenses")?;
        }
    }

    Ok(())
}
