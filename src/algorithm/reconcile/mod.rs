//! Dual-source reconciliation
//!
//! HRSN needs are recorded twice: as structured screening answers on the
//! patient and as problems extracted from clinical notes. This module merges
//! the two counts per category into one provenance-tagged result.

use serde::Serialize;

use crate::algorithm::aggregation::{Breakdown, CategoryCounts};
use crate::models::{HrsnAnswer, InsightKind, InsightRecord, PatientRecord, Provenance};
use crate::normalize::normalize_label;

/// One category after reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledCategory {
    /// Normalized category label
    pub id: String,
    /// Count from structured fields
    pub structured: u64,
    /// Count from extracted insights
    pub extracted: u64,
    /// Sum of both counts
    pub combined: u64,
    /// Which sources had records for the category
    pub provenance: Provenance,
}

/// Structured counts: patients answering `Yes`, per category
///
/// A category is registered as soon as any patient answered it, so an
/// all-`No` category is present with count 0.
#[must_use]
pub fn structured_hrsn_counts(patients: &[&PatientRecord], categories: &[String]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for category in categories {
        let category = normalize_label(category);
        for patient in patients {
            match patient.hrsn_answer(&category) {
                Some(HrsnAnswer::Yes) => counts.add(&category, 1),
                Some(HrsnAnswer::No) => counts.add(&category, 0),
                None => {}
            }
        }
    }
    counts
}

/// Extracted counts: summed weights of HRSN problem insights, per label
#[must_use]
pub fn extracted_hrsn_counts(insights: &[&InsightRecord]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for insight in insights
        .iter()
        .filter(|insight| insight.kind == InsightKind::HrsnProblem)
    {
        counts.add(&normalize_label(&insight.label), insight.count);
    }
    counts
}

/// Provenance of a reconciled category
///
/// A source only counts as contributing when its count is non-zero. When
/// neither count is, the category keeps the provenance of whichever sources
/// had records for it, and `NoData` means neither did.
fn provenance_for(structured: Option<u64>, extracted: Option<u64>) -> Provenance {
    match (structured, extracted) {
        (Some(s), Some(e)) if s > 0 && e == 0 => Provenance::StructuredOnly,
        (Some(s), Some(e)) if s == 0 && e > 0 => Provenance::ExtractedOnly,
        (Some(_), Some(_)) => Provenance::DualSource,
        (Some(_), None) => Provenance::StructuredOnly,
        (None, Some(_)) => Provenance::ExtractedOnly,
        (None, None) => Provenance::NoData,
    }
}

/// Merge structured and extracted counts
///
/// Every key from either source and every requested key appears exactly
/// once. Requested keys come first in the requested order, then remaining
/// structured keys, then remaining extracted keys, each in first-seen order.
#[must_use]
pub fn reconcile(
    requested: &[String],
    structured: &CategoryCounts,
    extracted: &CategoryCounts,
) -> Vec<ReconciledCategory> {
    let mut keys = CategoryCounts::new();
    for key in requested {
        keys.add(&normalize_label(key), 0);
    }
    for (key, _) in structured.iter().chain(extracted.iter()) {
        keys.add(key, 0);
    }

    keys.iter()
        .map(|(key, _)| {
            let from_structured = structured.get(key);
            let from_extracted = extracted.get(key);
            let provenance = provenance_for(from_structured, from_extracted);
            let structured = from_structured.unwrap_or(0);
            let extracted = from_extracted.unwrap_or(0);
            ReconciledCategory {
                id: key.to_string(),
                structured,
                extracted,
                combined: structured + extracted,
                provenance,
            }
        })
        .collect()
}

/// Rank reconciled categories by combined count
///
/// `total` is the filtered population size.
#[must_use]
pub fn to_breakdown(categories: &[ReconciledCategory], total: u64) -> Breakdown {
    Breakdown::ranked(
        categories
            .iter()
            .map(|category| (category.id.clone(), category.combined, category.provenance)),
        total,
    )
}
