use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use pop_insights::{
    HrsnAnswer, InsightKind, InsightRecord, PatientRecord, RawRecord, RecordSnapshot,
};
use serde_json::{Value, json};

/// Convert a JSON object literal into a raw record
#[must_use]
pub fn raw(value: Value) -> RawRecord {
    value.as_object().cloned().expect("fixture must be a JSON object")
}

/// Small population used across tests
///
/// Three patients carry a Depression diagnosis (`p1`, `p3`, `p6`), two
/// answered `Yes` to housing insecurity (`p2`, `p6`) and one has a
/// housing problem extracted from notes only (`p4`).
#[must_use]
pub fn sample_patients() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new("p1").with_zip("3034").with_age(34),
        PatientRecord::new("p2")
            .with_zip("3034")
            .with_age(52)
            .with_hrsn("housing_insecurity", HrsnAnswer::Yes),
        PatientRecord::new("p3")
            .with_zip("02101-1234")
            .with_age(29)
            .with_hrsn("housing_insecurity", HrsnAnswer::No),
        PatientRecord::new("p4").with_zip("02101").with_age(71),
        PatientRecord::new("p5").with_age(15),
        PatientRecord::new("p6")
            .with_zip("01720")
            .with_age(44)
            .with_hrsn("housing_insecurity", HrsnAnswer::Yes),
    ]
}

/// Insights linked to [`sample_patients`]
#[must_use]
pub fn sample_insights() -> Vec<InsightRecord> {
    vec![
        InsightRecord::new("p1", InsightKind::Diagnosis, "Depression"),
        InsightRecord::new("p1", InsightKind::SymptomSegment, "Mood"),
        InsightRecord::new("p2", InsightKind::Diagnosis, "Anxiety"),
        InsightRecord::new("p3", InsightKind::Diagnosis, "Depression"),
        InsightRecord::new("p3", InsightKind::SymptomId, "R45.2"),
        InsightRecord::new("p4", InsightKind::HrsnProblem, "housing_insecurity").with_count(2),
        InsightRecord::new("p6", InsightKind::Diagnosis, " Depression "),
        InsightRecord::new("p6", InsightKind::HrsnProblem, "housing_insecurity"),
    ]
}

/// Snapshot of the sample population
#[must_use]
pub fn sample_snapshot() -> RecordSnapshot {
    RecordSnapshot::new(sample_patients(), sample_insights())
}

/// Write a JSON document to a file in `dir`
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(value).expect("serializable fixture"))
        .expect("write JSON fixture");
    path
}

/// Raw patient records matching [`write_patient_parquet`]
#[must_use]
pub fn patient_json() -> Value {
    json!([
        {"patient_id": "p1", "zip_code": "3034", "age": 34, "gender": "Female", "housing_insecurity": "No"},
        {"patient_id": "p2", "zip_code": "3034", "age": 52, "gender": "Male", "housing_insecurity": "Yes"},
        {"patient_id": "p3", "zip_code": "02101", "age": 29, "housing_insecurity": null}
    ])
}

/// Write patient records to a Parquet file in `dir`
pub fn write_patient_parquet(dir: &Path, name: &str) -> PathBuf {
    let schema = Arc::new(Schema::new(vec![
        Field::new("patient_id", DataType::Utf8, false),
        Field::new("zip_code", DataType::Int64, true),
        Field::new("age", DataType::Int64, true),
        Field::new("gender", DataType::Utf8, true),
        Field::new("housing_insecurity", DataType::Boolean, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["p1", "p2", "p3"])),
        Arc::new(Int64Array::from(vec![Some(3034), Some(3034), Some(2101)])),
        Arc::new(Int64Array::from(vec![Some(34), Some(52), Some(29)])),
        Arc::new(StringArray::from(vec![Some("Female"), Some("Male"), None])),
        Arc::new(BooleanArray::from(vec![Some(false), Some(true), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("valid fixture batch");

    let path = dir.join(name);
    let file = File::create(&path).expect("create Parquet fixture");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Parquet writer");
    writer.write(&batch).expect("write Parquet batch");
    writer.close().expect("close Parquet writer");
    path
}

/// Write long-form insight records to a Parquet file in `dir`
pub fn write_insight_parquet(dir: &Path, name: &str) -> PathBuf {
    let schema = Arc::new(Schema::new(vec![
        Field::new("patient_id", DataType::Utf8, false),
        Field::new("kind", DataType::Utf8, false),
        Field::new("label", DataType::Utf8, false),
        Field::new("count", DataType::Int64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["p1", "p3", "p3"])),
        Arc::new(StringArray::from(vec!["diagnosis", "diagnosis", "hrsn_problem"])),
        Arc::new(StringArray::from(vec!["Depression", "Anxiety", "housing_insecurity"])),
        Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("valid fixture batch");

    let path = dir.join(name);
    let file = File::create(&path).expect("create Parquet fixture");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Parquet writer");
    writer.write(&batch).expect("write Parquet batch");
    writer.close().expect("close Parquet writer");
    path
}
