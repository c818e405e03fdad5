//! Tests for filter configuration parsing and resolution

use crate::utils::{sample_insights, sample_patients, sample_snapshot};
use pop_insights::{
    FilterConfiguration, InsightError, InsightKind, LinkOperator, resolve, resolve_snapshot,
};

fn ids(filtered: &pop_insights::FilteredPopulation<'_>) -> Vec<String> {
    filtered.patients().iter().map(|p| p.id.clone()).collect()
}

/// Only Diagnoses = {Depression} with all AND keeps the linked patients in
/// input order
#[test]
fn test_single_diagnosis_filter() {
    let snapshot = sample_snapshot();
    let config = FilterConfiguration::builder()
        .select(InsightKind::Diagnosis, ["Depression"])
        .all_operators(LinkOperator::And)
        .build();

    let filtered = resolve_snapshot(&config, &snapshot);
    assert_eq!(ids(&filtered), vec!["p1", "p3", "p6"]);
    assert_eq!(filtered.source_size(), 6);
    assert!(
        filtered
            .insights()
            .iter()
            .all(|insight| ["p1", "p3", "p6"].contains(&insight.patient_id.as_str()))
    );
}

/// An all-empty configuration returns the entire population
#[test]
fn test_vacuous_filter() {
    let patients = sample_patients();
    let insights = sample_insights();
    for operator in [LinkOperator::And, LinkOperator::Or] {
        let config = FilterConfiguration::builder().all_operators(operator).build();
        let filtered = resolve(&config, &patients, &insights);
        assert_eq!(filtered.len(), patients.len());
        assert_eq!(filtered.insights().len(), insights.len());
    }
}

/// An OR after an empty group admits everyone, since empty groups are true
#[test]
fn test_or_with_empty_group_is_vacuous() {
    let snapshot = sample_snapshot();
    let config = FilterConfiguration::builder()
        .select(InsightKind::Diagnosis, ["Anxiety"])
        .operators([
            LinkOperator::And,
            LinkOperator::And,
            LinkOperator::Or,
            LinkOperator::And,
        ])
        .build();
    let filtered = resolve_snapshot(&config, &snapshot);
    assert_eq!(filtered.len(), 6);
}

/// Folding is left-associative: (Depression AND R45.2) OR housing
#[test]
fn test_left_associative_fold() {
    let snapshot = sample_snapshot();
    let config = FilterConfiguration::builder()
        .select(InsightKind::Diagnosis, ["Depression"])
        .select(InsightKind::SymptomId, ["R45.2"])
        .select(InsightKind::HrsnProblem, ["housing_insecurity"])
        .operators([
            LinkOperator::And,
            LinkOperator::And,
            LinkOperator::And,
            LinkOperator::Or,
        ])
        .build();
    let filtered = resolve_snapshot(&config, &snapshot);
    assert_eq!(ids(&filtered), vec!["p2", "p3", "p4", "p6"]);

    let matches: Vec<_> = filtered
        .group_matches()
        .iter()
        .map(|m| (m.kind, m.matched_patients))
        .collect();
    assert_eq!(
        matches,
        vec![
            (InsightKind::Diagnosis, 3),
            (InsightKind::SymptomId, 1),
            (InsightKind::HrsnProblem, 3),
        ]
    );
}

/// Selected values are normalized before matching
#[test]
fn test_selection_is_normalized() {
    let snapshot = sample_snapshot();
    let config = FilterConfiguration::builder()
        .select(InsightKind::Diagnosis, ["  Depression  "])
        .build();
    assert_eq!(resolve_snapshot(&config, &snapshot).len(), 3);
    assert!(!config.is_unconstrained());
}

/// JSON configurations are validated for shape
#[test]
fn test_json_configuration_validation() {
    let valid = r#"{
        "groups": [
            {"kind": "symptom_segment", "values": []},
            {"kind": "diagnosis", "values": ["Depression"]},
            {"kind": "diagnostic_category"},
            {"kind": "symptom_id", "values": []},
            {"kind": "hrsn_problem", "values": []}
        ],
        "operators": ["AND", "and", "OR", "AND"]
    }"#;
    let config = FilterConfiguration::from_json(valid).unwrap();
    assert_eq!(config.operators()[2], LinkOperator::Or);
    assert!(config.group(InsightKind::Diagnosis).values().contains("Depression"));

    let wrong_operator_count = r#"{
        "groups": [
            {"kind": "symptom_segment"}, {"kind": "diagnosis"},
            {"kind": "diagnostic_category"}, {"kind": "symptom_id"},
            {"kind": "hrsn_problem"}
        ],
        "operators": ["AND", "AND", "AND"]
    }"#;
    assert!(matches!(
        FilterConfiguration::from_json(wrong_operator_count),
        Err(InsightError::InvalidFilterConfiguration(_))
    ));

    let wrong_order = r#"{
        "groups": [
            {"kind": "diagnosis"}, {"kind": "symptom_segment"},
            {"kind": "diagnostic_category"}, {"kind": "symptom_id"},
            {"kind": "hrsn_problem"}
        ],
        "operators": ["AND", "AND", "AND", "AND"]
    }"#;
    assert!(matches!(
        FilterConfiguration::from_json(wrong_order),
        Err(InsightError::InvalidFilterConfiguration(_))
    ));

    let four_groups = r#"{"groups": [{"kind": "symptom_segment"}], "operators": []}"#;
    assert!(FilterConfiguration::from_json(four_groups).is_err());
}
