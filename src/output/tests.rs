//! Tests for output module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

fn tweets() -> Vec<JsonValue> {
    vec![
        json!({"id": "1", "text": "hello"}),
        json!({"id": "2", "text": "with, comma"}),
        json!({"id": "3", "text": "say \"hi\"\nbye"}),
    ]
}

fn csv_string(records: &[JsonValue]) -> String {
    let mut buf = Vec::new();
    write_csv(&mut buf, records).unwrap();
    String::from_utf8(buf).unwrap()
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_roundtrips_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweets.json");

    save_to_json(&path, &tweets()).unwrap();

    let written: Vec<JsonValue> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, tweets());
}

#[test]
fn test_json_empty_list() {
    let mut buf = Vec::new();
    write_json(&mut buf, &[]).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_quotes_fields() {
    assert_eq!(
        csv_string(&tweets()),
        "id,text\r\n1,hello\r\n2,\"with, comma\"\r\n3,\"say \"\"hi\"\"\nbye\"\r\n"
    );
}

#[test]
fn test_csv_nested_and_missing_values() {
    let records = vec![
        json!({"id": "1", "public_metrics": {"like_count": 2}, "text": "a"}),
        json!({"id": "2", "text": null}),
    ];
    assert_eq!(
        csv_string(&records),
        "id,public_metrics,text\r\n1,\"{\"\"like_count\"\":2}\",a\r\n2,,\r\n"
    );
}

#[test]
fn test_csv_rejects_empty_input() {
    let mut buf = Vec::new();
    let err = write_csv(&mut buf, &[]).unwrap_err();
    assert!(matches!(err, Error::Output { .. }));

    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert!(save_to_csv(&path, &[]).is_err());
    assert!(!path.exists());
}

#[test]
fn test_csv_rejects_unknown_field() {
    let records = vec![
        json!({"id": "1", "text": "a"}),
        json!({"id": "2", "lang": "en", "text": "b"}),
    ];
    let mut buf = Vec::new();
    let err = write_csv(&mut buf, &records).unwrap_err();
    assert!(err.to_string().contains("'lang'"));
    assert!(buf.is_empty());
}

#[test]
fn test_csv_rejects_non_objects() {
    let mut buf = Vec::new();
    assert!(write_csv(&mut buf, &[json!(["not", "an", "object"])]).is_err());
}

#[test]
fn test_csv_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweets.csv");
    assert_eq!(save_to_csv(&path, &tweets()).unwrap(), 3);
    assert!(std::fs::read_to_string(&path).unwrap().starts_with("id,text\r\n"));
}

// ============================================================================
// Table
// ============================================================================

#[test]
fn test_table_inserts_rows() {
    let table = TweetTable::open_in_memory().unwrap();
    let summary = table.insert(&tweets()).unwrap();

    assert_eq!(
        summary,
        InsertSummary {
            inserted: 3,
            skipped: 0
        }
    );
    assert_eq!(table.count().unwrap(), 3);
    assert_eq!(table.text_of("2").unwrap().as_deref(), Some("with, comma"));
    assert_eq!(table.text_of("404").unwrap(), None);
}

#[test]
fn test_table_skips_duplicates_and_incomplete_records() {
    let table = TweetTable::open_in_memory().unwrap();
    table.insert(&[json!({"id": "1", "text": "first"})]).unwrap();

    let summary = table
        .insert(&[
            json!({"id": "1", "text": "duplicate"}),
            json!({"id": "2"}),
            json!({"text": "no id"}),
            json!({"id": 3, "text": "numeric id"}),
        ])
        .unwrap();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 3);
    assert_eq!(table.text_of("1").unwrap().as_deref(), Some("first"));
    assert_eq!(table.text_of("3").unwrap().as_deref(), Some("numeric id"));
}

#[test]
fn test_save_to_table_reopens_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweets.duckdb");

    let first = save_to_table(&path, &tweets()).unwrap();
    assert_eq!(first.inserted, 3);

    let second = save_to_table(&path, &tweets()).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 3);

    assert_eq!(TweetTable::open(&path).unwrap().count().unwrap(), 3);
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_write_records_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    write_records(OutputFormat::Csv, Some(&path), &tweets()).unwrap();
    assert!(path.exists());
}

#[test]
fn test_table_format_needs_path() {
    let err = write_records(OutputFormat::Table, None, &tweets()).unwrap_err();
    assert!(matches!(err, Error::Output { .. }));
}
