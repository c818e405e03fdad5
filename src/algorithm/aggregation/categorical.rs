//! Category breakdowns over a filtered population
//!
//! Demographic and ZIP breakdowns count patients from structured fields.
//! Insight breakdowns count distinct patients per extracted label. The
//! denominator is the number of patients in the filtered population, except
//! for Yes/No indicators, where only patients with an answer are counted.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::algorithm::aggregation::breakdown::{Breakdown, CategoryCounts};
use crate::models::{Demographic, HrsnAnswer, InsightKind, InsightRecord, PatientRecord, Provenance};
use crate::normalize::UNKNOWN;

fn population_size(patients: &[&PatientRecord]) -> u64 {
    patients.len() as u64
}

/// Breakdown of a demographic attribute; absent values count as `Unknown`
#[must_use]
pub fn demographic_breakdown(patients: &[&PatientRecord], attribute: Demographic) -> Breakdown {
    let counts = CategoryCounts::from_values(
        patients
            .iter()
            .map(|patient| patient.demographic(attribute).unwrap_or(UNKNOWN)),
    );
    Breakdown::from_counts(&counts, population_size(patients), Provenance::StructuredOnly)
}

/// Breakdown by canonical ZIP code
///
/// Only observed ZIP codes are emitted. Patients without a usable ZIP stay
/// in the denominator, so the percentages sum to less than 100 when some
/// ZIPs are missing.
#[must_use]
pub fn zip_breakdown(patients: &[&PatientRecord]) -> Breakdown {
    let counts = CategoryCounts::from_values(
        patients
            .iter()
            .filter_map(|patient| patient.zip.as_ref()),
    );
    Breakdown::from_counts(&counts, population_size(patients), Provenance::StructuredOnly)
}

/// Breakdown of extracted labels of one kind
///
/// Each patient counts at most once per label, however many insights repeat
/// it.
#[must_use]
pub fn insight_breakdown(
    patients: &[&PatientRecord],
    insights: &[&InsightRecord],
    kind: InsightKind,
) -> Breakdown {
    let mut seen: FxHashSet<(&str, &str)> = FxHashSet::default();
    let counts = CategoryCounts::from_values(
        insights
            .iter()
            .filter(|insight| insight.kind == kind)
            .filter(|insight| seen.insert((insight.patient_id.as_str(), insight.label.as_str())))
            .map(|insight| insight.label.as_str()),
    );
    Breakdown::from_counts(&counts, population_size(patients), Provenance::ExtractedOnly)
}

/// Yes/No breakdown of one HRSN indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YesNoBreakdown {
    /// HRSN category
    pub category: String,
    /// Exactly two results, `Yes` then `No`, over answered patients
    pub breakdown: Breakdown,
    /// Patients with no answer for the category, outside the denominator
    pub unanswered: u64,
}

/// Yes/No breakdown for an HRSN category
///
/// Always emits both entries, even when one count is zero. The answer is
/// the partitioning key, so unanswered patients are reported on the side and
/// the denominator is `yes + no` (0 when nobody answered).
#[must_use]
pub fn yes_no_breakdown(patients: &[&PatientRecord], category: &str) -> YesNoBreakdown {
    let (yes, no, unanswered) =
        patients
            .iter()
            .fold((0, 0, 0), |(yes, no, unanswered), patient| {
                match patient.hrsn_answer(category) {
                    Some(HrsnAnswer::Yes) => (yes + 1, no, unanswered),
                    Some(HrsnAnswer::No) => (yes, no + 1, unanswered),
                    None => (yes, no, unanswered + 1),
                }
            });

    YesNoBreakdown {
        category: category.to_string(),
        breakdown: Breakdown::in_fixed_order(
            [
                (HrsnAnswer::Yes.label().to_string(), yes, Provenance::StructuredOnly),
                (HrsnAnswer::No.label().to_string(), no, Provenance::StructuredOnly),
            ],
            yes + no,
        ),
        unanswered,
    }
}
