//! Tests for loading Parquet record sources

use crate::utils::{write_insight_parquet, write_json, write_patient_parquet};
use pop_insights::loader::{load_raw_records, load_raw_records_async};
use pop_insights::{
    EngineConfig, HrsnAnswer, InsightKind, Result, load_snapshot, load_snapshot_async,
};
use serde_json::{Value, json};

/// Parquet columns become loosely typed records; nulls are absent
#[test]
fn test_parquet_records_are_loosely_typed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_patient_parquet(dir.path(), "patients.parquet");

    let records = load_raw_records(&path, &EngineConfig::default())?;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("zip_code"), Some(&Value::from(3034)));
    assert_eq!(records[1].get("housing_insecurity"), Some(&Value::Bool(true)));
    assert!(records[2].get("gender").is_none());
    Ok(())
}

/// Async snapshot loading from Parquet files
#[tokio::test]
async fn test_async_parquet_snapshot() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let patients = write_patient_parquet(dir.path(), "patients.parquet");
    let insights = write_insight_parquet(dir.path(), "insights.parquet");
    let config = EngineConfig {
        batch_size: 2,
        ..EngineConfig::default()
    };

    let snapshot = load_snapshot_async(&patients, &insights, &config).await?;
    assert_eq!(snapshot.patients().len(), 3);
    assert_eq!(snapshot.insights().len(), 3);

    let p3 = &snapshot.patients()[2];
    assert_eq!(p3.zip.as_ref().map(|z| z.as_str()), Some("02101"));
    assert_eq!(p3.hrsn_answer("housing_insecurity"), None);
    assert_eq!(
        snapshot.patients()[1].hrsn_answer("housing_insecurity"),
        Some(HrsnAnswer::Yes)
    );

    let hrsn = snapshot
        .insights()
        .iter()
        .find(|insight| insight.kind == InsightKind::HrsnProblem)
        .unwrap();
    assert_eq!(hrsn.count, 3);
    Ok(())
}

/// Blocking and async loads agree, including for mixed directories
#[tokio::test]
async fn test_mixed_directory_loads() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_patient_parquet(dir.path(), "a_patients.parquet");
    write_json(dir.path(), "b_patients.json", &json!([{"patient_id": "p4", "zip": "01720"}]));
    let config = EngineConfig::default();

    let blocking = load_raw_records(dir.path(), &config)?;
    let asynchronous = load_raw_records_async(dir.path(), &config).await?;
    assert_eq!(blocking.len(), 4);
    assert_eq!(blocking, asynchronous);
    assert_eq!(blocking[3].get("patient_id"), Some(&Value::from("p4")));

    let insights = write_insight_parquet(dir.path(), "insights.parquet");
    let snapshot = load_snapshot(&dir.path().join("b_patients.json"), &insights, &config)?;
    assert_eq!(snapshot.patients().len(), 1);
    Ok(())
}
