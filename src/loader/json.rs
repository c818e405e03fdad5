//! JSON record files
//!
//! A file holds either an array of objects or a single object. Array
//! elements that are not objects are skipped with a warning.

use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde_json::Value;

use crate::error::util::safe_open_file;
use crate::error::{InsightError, Result};
use crate::models::RawRecord;
use crate::utils::LoadLog;

/// Turn a parsed JSON document into raw records
pub fn records_from_value(value: Value) -> Result<Vec<RawRecord>> {
    match value {
        Value::Array(items) => {
            let total = items.len();
            let records: Vec<RawRecord> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(record) => Some(record),
                    _ => None,
                })
                .collect();
            if records.len() < total {
                warn!(
                    "Skipped {} JSON array elements that are not objects",
                    total - records.len()
                );
            }
            Ok(records)
        }
        Value::Object(record) => Ok(vec![record]),
        other => Err(InsightError::UnsupportedSource(format!(
            "expected a JSON array of objects, found {}",
            json_type(&other)
        ))),
    }
}

/// Parse raw records from JSON bytes
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    records_from_value(serde_json::from_slice(bytes)?)
}

/// Read raw records from a JSON file
pub fn read_json_records(path: &Path) -> Result<Vec<RawRecord>> {
    let log = LoadLog::start("Reading JSON records", path);
    let file = safe_open_file(path, "JSON records")?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let records = records_from_value(value)?;
    log.records(records.len());
    Ok(records)
}

/// Read raw records from a JSON file asynchronously
///
/// The file is read with tokio and parsed on the blocking pool.
pub async fn read_json_records_async(path: &Path) -> Result<Vec<RawRecord>> {
    let log = LoadLog::start("Reading JSON records asynchronously", path);
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| InsightError::path(path, format!("Failed to read JSON records: {e}")))?;
    let records = tokio::task::spawn_blocking(move || parse_records(&bytes))
        .await
        .map_err(|e| InsightError::Task(e.to_string()))??;
    log.records(records.len());
    Ok(records)
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
