//! JSON sink

use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `records` as one pretty-printed JSON array
pub fn write_json<W: Write>(writer: &mut W, records: &[JsonValue]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write `records` to a JSON file, replacing it
pub fn save_to_json(path: impl AsRef<Path>, records: &[JsonValue]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        Error::output(format!("Failed to create '{}': {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, records)
}
