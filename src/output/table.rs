//! DuckDB table sink
//!
//! Tweets are stored in a two-column `tweet` table keyed by id. Rows are
//! inserted one at a time; a row that cannot be inserted is logged and
//! skipped so one duplicate does not lose the rest of the batch.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use duckdb::{params, Connection};
use std::path::Path;
use tracing::{debug, warn};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tweet (
    tweet_id VARCHAR PRIMARY KEY,
    text VARCHAR NOT NULL
)";

const INSERT_ROW: &str = "INSERT INTO tweet (tweet_id, text) VALUES (?, ?)";

/// Outcome of one insert batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// A DuckDB connection holding the `tweet` table
pub struct TweetTable {
    conn: Connection,
}

impl TweetTable {
    /// Open (or create) a database file and make sure the table exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            Error::output(format!(
                "Failed to open database '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Use an existing connection
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn })
    }

    /// Insert every record that has an `id` and a `text`
    pub fn insert(&self, records: &[JsonValue]) -> Result<InsertSummary> {
        let mut summary = InsertSummary::default();

        for record in records {
            let Some((id, text)) = row_values(record) else {
                warn!("Skipping record without id/text: {}", record);
                summary.skipped += 1;
                continue;
            };

            match self.conn.execute(INSERT_ROW, params![id, text]) {
                Ok(_) => summary.inserted += 1,
                Err(e) => {
                    warn!("Skipping tweet {}: {}", id, e);
                    summary.skipped += 1;
                }
            }
        }

        debug!(
            "Inserted {} row(s), skipped {}",
            summary.inserted, summary.skipped
        );
        Ok(summary)
    }

    /// Number of stored rows
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tweet", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Text stored for `id`
    pub fn text_of(&self, id: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT text FROM tweet WHERE tweet_id = ?")?;
        let mut rows = stmt.query_map([id], |row| row.get::<_, String>(0))?;
        Ok(rows.next().transpose()?)
    }

    /// Give the connection back
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl std::fmt::Debug for TweetTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweetTable").finish_non_exhaustive()
    }
}

/// `id` (string or number) and `text` of a record
fn row_values(record: &JsonValue) -> Option<(String, &str)> {
    let id = match record.get("id")? {
        JsonValue::String(s) if !s.is_empty() => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        _ => return None,
    };
    let text = record.get("text")?.as_str()?;
    Some((id, text))
}

/// Open `path`, insert `records` and close the connection again
pub fn save_to_table(path: impl AsRef<Path>, records: &[JsonValue]) -> Result<InsertSummary> {
    let table = TweetTable::open(path)?;
    table.insert(records)
}
