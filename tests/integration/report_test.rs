//! End-to-end tests for population reports

use crate::utils::sample_snapshot;
use pop_insights::display::{Palette, render_report};
use pop_insights::{
    Demographic, EngineConfig, FilterConfiguration, InsightKind, PopulationReport, Provenance,
    SyntheticPopulation,
};

/// A filtered report uses the filtered population everywhere
#[test]
fn test_filtered_report() {
    let snapshot = sample_snapshot();
    let filter = FilterConfiguration::builder()
        .select(InsightKind::Diagnosis, ["Depression"])
        .build();
    let report = PopulationReport::build(
        &snapshot,
        &filter,
        &EngineConfig::default(),
        Some("housing_insecurity"),
    );

    assert_eq!(report.summary.source_patients, 6);
    assert_eq!(report.summary.filtered_patients, 3);
    assert_eq!(report.summary.located_patients, 3);

    let ages = report.demographic(Demographic::AgeRange).unwrap();
    assert_eq!(ages.total, 3);
    assert_eq!(ages.get("30-44").map(|r| r.count), Some(2));

    let diagnoses = report.insight(InsightKind::Diagnosis).unwrap();
    assert_eq!(diagnoses.entries.len(), 1);
    assert_eq!(diagnoses.entries[0].result.percentage, 100);

    let housing = report
        .hrsn
        .categories
        .iter()
        .find(|c| c.id == "housing_insecurity")
        .unwrap();
    assert_eq!(housing.structured, 1);
    assert_eq!(housing.extracted, 1);
    assert_eq!(housing.provenance, Provenance::DualSource);

    let focus = report.focus.as_ref().unwrap();
    assert_eq!(focus.rate.affected, 2);
    assert_eq!(focus.rate.population, 3);
    assert_eq!(focus.percentage, 67);
}

/// Re-running a search on the same snapshot gives identical statistics
#[test]
fn test_report_is_deterministic() {
    let snapshot = SyntheticPopulation::new(500).with_seed(21).snapshot();
    let filter = FilterConfiguration::builder()
        .select(InsightKind::DiagnosticCategory, ["Mood disorders", "Anxiety disorders"])
        .build();
    let config = EngineConfig::default();

    let first = PopulationReport::build(&snapshot, &filter, &config, Some("food_insecurity"));
    let second = PopulationReport::build(&snapshot, &filter, &config, Some("food_insecurity"));

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.demographics, second.demographics);
    assert_eq!(first.insights, second.insights);
    assert_eq!(first.hrsn, second.hrsn);
    assert_eq!(first.indicators, second.indicators);
    assert_eq!(first.zip_codes, second.zip_codes);
    assert_eq!(first.geography, second.geography);
}

/// Reports serialize to JSON and render to text
#[test]
fn test_report_outputs() {
    let snapshot = SyntheticPopulation::new(120).with_seed(4).snapshot();
    let config = EngineConfig::default();
    let report = PopulationReport::build(
        &snapshot,
        &FilterConfiguration::unconstrained(),
        &config,
        Some("housing_insecurity"),
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["filtered_patients"], 120);
    assert_eq!(json["filter"]["operators"][0], "AND");
    assert!(json["geography"].as_array().is_some_and(|bins| !bins.is_empty()));
    assert_eq!(json["zip_codes"]["limit"], 25);

    let text = render_report(&report, &Palette::default().with_levels(config.bucket_levels));
    assert!(text.contains("Population Summary:"));
    assert!(text.contains("Geography:"));
}

/// Configuration changes flow into the report
#[test]
fn test_config_overrides_apply() {
    let snapshot = SyntheticPopulation::new(200).with_seed(8).snapshot();
    let config = EngineConfig::default().with_overrides(|key| match key {
        "INSIGHT_TOP_N" => Some("2".to_string()),
        "INSIGHT_ZIP_TOP_N" => Some("3".to_string()),
        "INSIGHT_BUCKET_LEVELS" => Some("3".to_string()),
        _ => None,
    });
    let report = PopulationReport::build(
        &snapshot,
        &FilterConfiguration::unconstrained(),
        &config,
        None,
    );

    assert!(report.insights.iter().all(|section| section.top.entries.len() <= 2));
    assert!(report.zip_codes.entries.len() <= 3);
    assert!(report.geography.iter().all(|bin| bin.bucket < 3));
}
