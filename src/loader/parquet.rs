//! Parquet record files
//!
//! Every column is read through Arrow's display formatting. Integer and
//! floating point columns become JSON numbers, booleans stay booleans and
//! everything else becomes a string. Nulls are left out of the record.

use std::path::Path;

use arrow::array::Array;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use futures::TryStreamExt;
use parquet::arrow::async_reader::ParquetRecordBatchStreamBuilder;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Number, Value};

use crate::error::util::safe_open_file;
use crate::error::{InsightError, Result};
use crate::models::RawRecord;
use crate::utils::LoadLog;

/// Convert one cell's formatted text into a JSON value
fn cell_value(data_type: &DataType, text: String) -> Value {
    if data_type.is_integer() {
        if let Ok(n) = text.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(n) = text.parse::<u64>() {
            return Value::from(n);
        }
    } else if data_type.is_floating() {
        if let Some(n) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    } else if *data_type == DataType::Boolean {
        return Value::Bool(text == "true");
    }
    Value::String(text)
}

/// Convert a record batch into raw records, one per row
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<RawRecord>> {
    let options = FormatOptions::default();
    let schema = batch.schema();
    let mut records = vec![RawRecord::new(); batch.num_rows()];

    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        let formatter = ArrayFormatter::try_new(column.as_ref(), &options)?;
        for (row, record) in records.iter_mut().enumerate() {
            if column.is_null(row) {
                continue;
            }
            let text = formatter.value(row).to_string();
            record.insert(field.name().clone(), cell_value(field.data_type(), text));
        }
    }

    Ok(records)
}

fn batches_to_records(batches: &[RecordBatch]) -> Result<Vec<RawRecord>> {
    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in batches {
        records.extend(batch_to_records(batch)?);
    }
    Ok(records)
}

/// Read raw records from a Parquet file
pub fn read_parquet_records(path: &Path, batch_size: usize) -> Result<Vec<RawRecord>> {
    let log = LoadLog::start("Reading Parquet records", path);

    let file = safe_open_file(path, "Parquet records")?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(batch_size)
        .build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let records = batches_to_records(&batches)?;

    log.records(records.len());
    Ok(records)
}

/// Read raw records from a Parquet file asynchronously
pub async fn read_parquet_records_async(path: &Path, batch_size: usize) -> Result<Vec<RawRecord>> {
    let log = LoadLog::start("Reading Parquet records asynchronously", path);

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| InsightError::path(path, format!("Failed to open Parquet records: {e}")))?;
    let stream = ParquetRecordBatchStreamBuilder::new(file)
        .await?
        .with_batch_size(batch_size)
        .build()?;

    let batches: Vec<RecordBatch> = stream.try_collect().await?;
    let records = batches_to_records(&batches)?;

    log.records(records.len());
    Ok(records)
}
