//! CSV sink
//!
//! The header is taken from the first record. Strings are written as-is,
//! `null` as an empty cell and nested values as compact JSON. Fields are
//! quoted per RFC 4180 and rows end with CRLF.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const DELIMITER: char = ',';
const LINE_END: &str = "\r\n";

fn as_object(record: &JsonValue, index: usize) -> Result<&JsonObject> {
    record
        .as_object()
        .ok_or_else(|| Error::output(format!("record {index} is not a JSON object")))
}

/// Text of one cell
fn cell(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Quote a field if it contains a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains([DELIMITER, '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W: Write>(writer: &mut W, fields: impl Iterator<Item = String>) -> Result<()> {
    let line = fields
        .map(|f| escape(&f))
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string());
    writer.write_all(line.as_bytes())?;
    writer.write_all(LINE_END.as_bytes())?;
    Ok(())
}

/// Write `records` as CSV and return the number of data rows
///
/// Every record must be an object whose keys all appear in the header.
pub fn write_csv<W: Write>(writer: &mut W, records: &[JsonValue]) -> Result<usize> {
    let first = records
        .first()
        .ok_or_else(|| Error::output("nothing to write: no records"))?;
    let header: Vec<String> = as_object(first, 0)?.keys().cloned().collect();

    // Validate everything before the first byte goes out
    for (index, record) in records.iter().enumerate() {
        let object = as_object(record, index)?;
        if let Some(extra) = object.keys().find(|key| !header.contains(key)) {
            return Err(Error::output(format!(
                "record {index} has field '{extra}' not present in the header"
            )));
        }
    }

    write_row(writer, header.iter().cloned())?;
    for record in records {
        let object = as_object(record, 0)?;
        write_row(
            writer,
            header
                .iter()
                .map(|key| object.get(key).map(cell).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Write `records` to a CSV file, replacing it
pub fn save_to_csv(path: impl AsRef<Path>, records: &[JsonValue]) -> Result<usize> {
    let path = path.as_ref();
    if records.is_empty() {
        return Err(Error::output("nothing to write: no records"));
    }
    let file = File::create(path).map_err(|e| {
        Error::output(format!("Failed to create '{}': {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, records)
}
