//! Tests for loading JSON record sources

use crate::utils::{patient_json, write_json};
use pop_insights::loader::{RecordSource, load_raw_records, load_raw_records_async};
use pop_insights::{EngineConfig, HrsnAnswer, InsightKind, Result, load_snapshot};
use serde_json::json;

/// Patient and insight JSON files load into a typed snapshot
#[test]
fn test_load_json_snapshot() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let patients = write_json(dir.path(), "patients.json", &patient_json());
    let insights = write_json(
        dir.path(),
        "insights.json",
        &json!([
            {"patientId": "p1", "diagnosis": "Depression", "symptom_id": "R45.2"},
            {"patient_id": "p2", "kind": "HRSN Problems", "label": "housing_insecurity", "count": "2"},
            {"diagnosis": "Orphan"}
        ]),
    );

    let snapshot = load_snapshot(&patients, &insights, &EngineConfig::default())?;
    assert_eq!(snapshot.patients().len(), 3);
    assert_eq!(snapshot.insights().len(), 3);

    let p1 = &snapshot.patients()[0];
    assert_eq!(p1.zip.as_ref().map(|z| z.as_str()), Some("03034"));
    assert_eq!(p1.hrsn_answer("housing_insecurity"), Some(HrsnAnswer::No));

    let hrsn = snapshot
        .insights()
        .iter()
        .find(|insight| insight.kind == InsightKind::HrsnProblem)
        .unwrap();
    assert_eq!(hrsn.count, 2);
    Ok(())
}

/// A directory loads every JSON file in sorted path order
#[test]
fn test_load_json_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_json(dir.path(), "b.json", &json!([{"id": "b1"}, {"id": "b2"}]));
    write_json(dir.path(), "a.json", &json!([{"id": "a1"}]));
    std::fs::write(dir.path().join("notes.txt"), "ignored")?;

    assert!(matches!(
        RecordSource::detect(dir.path())?,
        RecordSource::Directory(_)
    ));

    let records = load_raw_records(dir.path(), &EngineConfig::default())?;
    let ids: Vec<_> = records
        .iter()
        .filter_map(|record| record.get("id").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(ids, vec!["a1", "b1", "b2"]);
    Ok(())
}

/// The async path reads the same records as the blocking path
#[tokio::test]
async fn test_async_json_matches_sync() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_json(dir.path(), "patients.json", &patient_json());
    let config = EngineConfig::default();

    let blocking = load_raw_records(&path, &config)?;
    let asynchronous = load_raw_records_async(&path, &config).await?;
    assert_eq!(blocking, asynchronous);
    Ok(())
}

/// Missing files are reported with their path
#[test]
fn test_missing_file_is_an_error() {
    let err = load_raw_records(
        std::path::Path::new("/no/such/patients.json"),
        &EngineConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("/no/such/patients.json"));
}
