//! Tests for dual-source reconciliation

use std::collections::BTreeSet;

use crate::utils::sample_snapshot;
use pop_insights::algorithm::reconcile::{extracted_hrsn_counts, structured_hrsn_counts};
use pop_insights::{
    EngineConfig, HrsnAnswer, InsightKind, InsightRecord, PatientRecord, Provenance,
    SyntheticPopulation, reconcile,
};

/// Every key from either source and every requested key appears once
#[test]
fn test_reconciliation_completeness() {
    let snapshot = SyntheticPopulation::new(400).with_seed(9).snapshot();
    let config = EngineConfig::default()
        .with_hrsn_categories(["housing_insecurity", "food_insecurity", "digital_access"]);
    let patients: Vec<_> = snapshot.patients().iter().collect();
    let insights: Vec<_> = snapshot.insights().iter().collect();

    let structured = structured_hrsn_counts(&patients, &config.hrsn_categories);
    let extracted = extracted_hrsn_counts(&insights);
    let reconciled = reconcile(&config.hrsn_categories, &structured, &extracted);

    let expected: BTreeSet<String> = structured
        .iter()
        .chain(extracted.iter())
        .map(|(key, _)| key.to_string())
        .chain(config.hrsn_categories.iter().cloned())
        .collect();
    let actual: Vec<String> = reconciled.iter().map(|c| c.id.clone()).collect();
    assert_eq!(actual.len(), expected.len());
    assert_eq!(actual.into_iter().collect::<BTreeSet<_>>(), expected);

    let digital = reconciled.iter().find(|c| c.id == "digital_access").unwrap();
    assert_eq!(digital.combined, 0);
    assert_eq!(digital.provenance, Provenance::NoData);

    for category in &reconciled {
        assert_eq!(category.combined, category.structured + category.extracted);
    }
}

/// Structured answers and extracted problems combine into dual-source counts
#[test]
fn test_dual_source_counts() {
    let snapshot = sample_snapshot();
    let patients: Vec<_> = snapshot.patients().iter().collect();
    let insights: Vec<_> = snapshot.insights().iter().collect();
    let requested = vec!["housing_insecurity".to_string()];

    let reconciled = reconcile(
        &requested,
        &structured_hrsn_counts(&patients, &requested),
        &extracted_hrsn_counts(&insights),
    );

    assert_eq!(reconciled.len(), 1);
    let housing = &reconciled[0];
    assert_eq!(housing.structured, 2);
    assert_eq!(housing.extracted, 3);
    assert_eq!(housing.combined, 5);
    assert_eq!(housing.provenance, Provenance::DualSource);
}

/// All screened patients answered `No` but notes report the need
#[test]
fn test_all_no_answers_with_extracted_problems() {
    let patients: Vec<_> = (0..4)
        .map(|i| PatientRecord::new(format!("p{i}")).with_hrsn("housing_insecurity", HrsnAnswer::No))
        .collect();
    let insights = vec![
        InsightRecord::new("p0", InsightKind::HrsnProblem, "housing_insecurity").with_count(2),
        InsightRecord::new("p1", InsightKind::HrsnProblem, "housing_insecurity"),
    ];
    let patient_refs: Vec<_> = patients.iter().collect();
    let insight_refs: Vec<_> = insights.iter().collect();
    let requested = vec!["housing_insecurity".to_string()];

    let reconciled = reconcile(
        &requested,
        &structured_hrsn_counts(&patient_refs, &requested),
        &extracted_hrsn_counts(&insight_refs),
    );

    let housing = &reconciled[0];
    assert_eq!(housing.structured, 0);
    assert_eq!(housing.combined, 3);
    assert_eq!(housing.provenance, Provenance::ExtractedOnly);
}
