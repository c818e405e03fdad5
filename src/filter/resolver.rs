//! Filter criteria resolution
//!
//! Decides, per patient, whether the patient belongs to the filtered
//! population, and derives the matching insight subset.

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::filter::criteria::{CriteriaGroup, FilterConfiguration, FilterCriteria, GROUP_COUNT};
use crate::models::{InsightKind, InsightRecord, PatientRecord, RecordSnapshot};

/// Values a patient has for each criteria group
#[derive(Debug, Clone, Default)]
pub struct PatientCriteriaValues<'a> {
    groups: [FxHashSet<&'a str>; GROUP_COUNT],
}

impl<'a> PatientCriteriaValues<'a> {
    /// Values for one group
    #[must_use]
    pub fn values(&self, kind: InsightKind) -> &FxHashSet<&'a str> {
        &self.groups[kind.index()]
    }

    fn insert(&mut self, kind: InsightKind, value: &'a str) {
        self.groups[kind.index()].insert(value);
    }
}

impl FilterCriteria<PatientCriteriaValues<'_>> for CriteriaGroup {
    fn meets_criteria(&self, patient: &PatientCriteriaValues<'_>) -> bool {
        self.matches_any(patient.values(self.kind()).iter().copied())
    }
}

impl FilterCriteria<PatientCriteriaValues<'_>> for FilterConfiguration {
    fn meets_criteria(&self, patient: &PatientCriteriaValues<'_>) -> bool {
        self.evaluate(|group| group.meets_criteria(patient))
    }
}

/// Per-patient criteria values, built once per pass
///
/// Insight labels populate the group matching their kind. HRSN categories a
/// patient answered `Yes` to also count as HRSN problem values.
#[derive(Debug, Default)]
pub struct PatientCriteriaIndex<'a> {
    by_patient: FxHashMap<&'a str, PatientCriteriaValues<'a>>,
    empty: PatientCriteriaValues<'a>,
}

impl<'a> PatientCriteriaIndex<'a> {
    /// Index insights and structured HRSN needs by patient identifier
    #[must_use]
    pub fn build(patients: &'a [PatientRecord], insights: &'a [InsightRecord]) -> Self {
        let mut by_patient: FxHashMap<&'a str, PatientCriteriaValues<'a>> = FxHashMap::default();

        for insight in insights {
            by_patient
                .entry(insight.patient_id.as_str())
                .or_default()
                .insert(insight.kind, insight.label.as_str());
        }

        for patient in patients {
            let mut needs = patient.hrsn_needs().peekable();
            if needs.peek().is_none() {
                continue;
            }
            let values = by_patient.entry(patient.id.as_str()).or_default();
            for need in needs {
                values.insert(InsightKind::HrsnProblem, need);
            }
        }

        Self {
            by_patient,
            empty: PatientCriteriaValues::default(),
        }
    }

    /// Criteria values for a patient; empty when the patient has none
    #[must_use]
    pub fn values_for(&self, patient_id: &str) -> &PatientCriteriaValues<'a> {
        self.by_patient.get(patient_id).unwrap_or(&self.empty)
    }
}

/// How many patients individually satisfied a constrained group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMatch {
    /// The group
    pub kind: InsightKind,
    /// Number of selected values in the group
    pub selected: usize,
    /// Patients matching this group on its own
    pub matched_patients: usize,
}

/// Result of resolving a filter against a population
#[derive(Debug, Clone, Serialize)]
pub struct FilteredPopulation<'a> {
    patients: Vec<&'a PatientRecord>,
    #[serde(skip)]
    insights: Vec<&'a InsightRecord>,
    source_size: usize,
    group_matches: Vec<GroupMatch>,
}

impl<'a> FilteredPopulation<'a> {
    /// Matching patients, in input order
    #[must_use]
    pub fn patients(&self) -> &[&'a PatientRecord] {
        &self.patients
    }

    /// Insights belonging to matching patients, in input order
    #[must_use]
    pub fn insights(&self) -> &[&'a InsightRecord] {
        &self.insights
    }

    /// Number of matching patients
    #[must_use]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Whether no patient matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Size of the population the filter ran against
    #[must_use]
    pub const fn source_size(&self) -> usize {
        self.source_size
    }

    /// Per-group match counts for constrained groups
    #[must_use]
    pub fn group_matches(&self) -> &[GroupMatch] {
        &self.group_matches
    }
}

/// Resolve a filter configuration against patients and insights
///
/// An unconstrained configuration returns every patient and insight
/// unchanged. Otherwise each patient is kept when the left-associative fold
/// of its group results is true.
#[must_use]
pub fn resolve<'a>(
    config: &FilterConfiguration,
    patients: &'a [PatientRecord],
    insights: &'a [InsightRecord],
) -> FilteredPopulation<'a> {
    if config.is_unconstrained() {
        debug!("Unconstrained filter, keeping all {} patients", patients.len());
        return FilteredPopulation {
            patients: patients.iter().collect(),
            insights: insights.iter().collect(),
            source_size: patients.len(),
            group_matches: Vec::new(),
        };
    }

    let index = PatientCriteriaIndex::build(patients, insights);

    let matched: Vec<&PatientRecord> = patients
        .iter()
        .filter(|patient| config.meets_criteria(index.values_for(&patient.id)))
        .collect();

    let group_matches = config
        .groups()
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| GroupMatch {
            kind: group.kind(),
            selected: group.values().len(),
            matched_patients: patients
                .iter()
                .filter(|patient| group.meets_criteria(index.values_for(&patient.id)))
                .count(),
        })
        .collect();

    let matched_ids: FxHashSet<&str> = matched.iter().map(|p| p.id.as_str()).collect();
    let matched_insights = insights
        .iter()
        .filter(|insight| matched_ids.contains(insight.patient_id.as_str()))
        .collect();

    debug!(
        "Filter kept {} of {} patients",
        matched.len(),
        patients.len()
    );

    FilteredPopulation {
        patients: matched,
        insights: matched_insights,
        source_size: patients.len(),
        group_matches,
    }
}

/// Resolve a filter configuration against a snapshot
#[must_use]
pub fn resolve_snapshot<'a>(
    config: &FilterConfiguration,
    snapshot: &'a RecordSnapshot,
) -> FilteredPopulation<'a> {
    resolve(config, snapshot.patients(), snapshot.insights())
}
