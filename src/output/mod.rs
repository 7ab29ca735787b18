//! Output module
//!
//! Persists collected records.
//!
//! # Sinks
//!
//! - **JSON**: the record list verbatim, pretty-printed
//! - **CSV**: one row per record, header from the first record
//! - **Table**: `tweet (tweet_id, text)` rows in a DuckDB database file

mod csv;
mod json;
mod table;

pub use self::csv::{save_to_csv, write_csv};
pub use json::{save_to_json, write_json};
pub use table::{save_to_table, InsertSummary, TweetTable};

use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::io;
use std::path::Path;

/// Where and how records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// Comma-separated values with a header row
    Csv,
    /// DuckDB `tweet` table (requires an output path)
    Table,
}

/// Write `records` in `format` to `output`, or to stdout when no path is given
pub fn write_records(
    format: OutputFormat,
    output: Option<&Path>,
    records: &[JsonValue],
) -> Result<()> {
    match (format, output) {
        (OutputFormat::Json, Some(path)) => save_to_json(path, records),
        (OutputFormat::Json, None) => write_json(&mut io::stdout().lock(), records),
        (OutputFormat::Csv, Some(path)) => save_to_csv(path, records).map(|_| ()),
        (OutputFormat::Csv, None) => write_csv(&mut io::stdout().lock(), records).map(|_| ()),
        (OutputFormat::Table, Some(path)) => {
            let summary = save_to_table(path, records)?;
            tracing::info!(
                "Saved {} tweet(s) to {} ({} skipped)",
                summary.inserted,
                path.display(),
                summary.skipped
            );
            Ok(())
        }
        (OutputFormat::Table, None) => Err(Error::output("table output needs --output <file>")),
    }
}

#[cfg(test)]
mod tests;
