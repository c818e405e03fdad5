//! Tests for categorical aggregation

use pop_insights::algorithm::aggregation::{
    demographic_breakdown, insight_breakdown, yes_no_breakdown, zip_breakdown,
};
use pop_insights::{
    Demographic, EngineConfig, HrsnAnswer, InsightKind, PatientRecord, SyntheticPopulation, normalize_zip,
};

/// ZIPs `3034, 3034, 02101` normalize and aggregate as the dashboard shows
#[test]
fn test_zip_scenario() {
    let raw = ["3034", "3034", "02101"];
    let normalized: Vec<_> = raw
        .iter()
        .filter_map(|zip| normalize_zip(zip))
        .map(|zip| zip.to_string())
        .collect();
    assert_eq!(normalized, vec!["03034", "03034", "02101"]);

    let patients: Vec<_> = raw
        .iter()
        .enumerate()
        .map(|(i, zip)| PatientRecord::new(i.to_string()).with_zip(*zip))
        .collect();
    let refs: Vec<_> = patients.iter().collect();
    let rows: Vec<_> = zip_breakdown(&refs)
        .results
        .into_iter()
        .map(|r| (r.id, r.count, r.percentage, r.rank))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("03034".to_string(), 2, 67, 1),
            ("02101".to_string(), 1, 33, 2),
        ]
    );
}

/// Percentages of a partitioning category stay within one point of 100
#[test]
fn test_percentage_conservation() {
    let (patients, _) = SyntheticPopulation::new(997).with_seed(11).generate();
    let refs: Vec<_> = patients.iter().collect();

    for attribute in [Demographic::Gender, Demographic::Ethnicity] {
        let breakdown = demographic_breakdown(&refs, attribute);
        let sum = breakdown.percentage_sum();
        assert!((99..=101).contains(&sum), "{attribute:?} sums to {sum}");
    }

    let empty: Vec<&PatientRecord> = Vec::new();
    assert_eq!(demographic_breakdown(&empty, Demographic::Race).percentage_sum(), 0);
}

/// Truncation never changes the denominator or the kept percentages
#[test]
fn test_top_n_denominator_invariant() {
    let (patients, insights) = SyntheticPopulation::new(300).with_seed(5).generate();
    let patient_refs: Vec<_> = patients.iter().collect();
    let insight_refs: Vec<_> = insights.iter().collect();

    let full = insight_breakdown(&patient_refs, &insight_refs, InsightKind::SymptomId);
    let top = full.top(3);

    assert_eq!(top.total, full.total);
    assert_eq!(top.entries.len(), 3.min(full.len()));
    for (entry, result) in top.entries.iter().zip(&full.results) {
        assert_eq!(&entry.result, result);
    }
    assert_eq!(top.shown_count() + top.omitted_count, full.results.iter().map(|r| r.count).sum::<u64>());
}

/// Population 100, nobody affected: `[{Yes,0,0},{No,100,100}]`
#[test]
fn test_yes_no_zero_affected() {
    let patients: Vec<_> = (0..100)
        .map(|i| PatientRecord::new(format!("p{i}")).with_hrsn("housing_insecurity", HrsnAnswer::No))
        .collect();
    let refs: Vec<_> = patients.iter().collect();
    let indicator = yes_no_breakdown(&refs, "housing_insecurity");

    let rows: Vec<_> = indicator
        .breakdown
        .results
        .iter()
        .map(|r| (r.id.as_str(), r.count, r.percentage))
        .collect();
    assert_eq!(rows, vec![("Yes", 0, 0), ("No", 100, 100)]);
}

/// Yes/No percentages conserve over answered patients only
#[test]
fn test_yes_no_conservation_with_unanswered() {
    let (patients, _) = SyntheticPopulation::new(997).with_seed(17).generate();
    let refs: Vec<_> = patients.iter().collect();

    for category in &EngineConfig::default().hrsn_categories {
        let indicator = yes_no_breakdown(&refs, category);
        let answered: u64 = indicator.breakdown.results.iter().map(|r| r.count).sum();

        assert_eq!(indicator.breakdown.total, answered);
        assert_eq!(answered + indicator.unanswered, refs.len() as u64);
        assert!(indicator.unanswered > 0);
        assert!((99..=101).contains(&indicator.breakdown.percentage_sum()));
    }
}

/// Same inputs, same outputs
#[test]
fn test_aggregation_is_deterministic() {
    let (patients, insights) = SyntheticPopulation::new(150).with_seed(42).generate();
    let patient_refs: Vec<_> = patients.iter().collect();
    let insight_refs: Vec<_> = insights.iter().collect();

    let first = insight_breakdown(&patient_refs, &insight_refs, InsightKind::Diagnosis);
    let second = insight_breakdown(&patient_refs, &insight_refs, InsightKind::Diagnosis);
    assert_eq!(first, second);
    assert_eq!(zip_breakdown(&patient_refs), zip_breakdown(&patient_refs));
}
