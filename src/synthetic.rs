//! Synthetic populations for demos and tests
//!
//! Generates patients and linked insights with realistic-looking
//! distributions. The same seed always yields the same records.

use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::DEFAULT_HRSN_CATEGORIES;
use crate::models::{Demographic, HrsnAnswer, InsightKind, InsightRecord, PatientRecord, RecordSnapshot};

const ZIP_CODES: &[&str] = &[
    "3034", "03038", "02101", "02139-4307", "021390000", "01720", "01852", "01960", "02021", "n/a",
];
const GENDERS: &[&str] = &["Female", "Male", "Nonbinary"];
const RACES: &[&str] = &["White", "Black", "Asian", "Native American", "Other"];
const ETHNICITIES: &[&str] = &["Hispanic or Latino", "Not Hispanic or Latino"];

const SYMPTOM_SEGMENTS: &[&str] = &["Mood", "Sleep", "Appetite", "Cognition", "Pain"];
const DIAGNOSES: &[&str] = &[
    "Depression",
    "Anxiety",
    "PTSD",
    "Insomnia",
    "Bipolar disorder",
    "Substance use disorder",
];
const DIAGNOSTIC_CATEGORIES: &[&str] = &[
    "Mood disorders",
    "Anxiety disorders",
    "Sleep-wake disorders",
    "Substance-related disorders",
];
const SYMPTOM_IDS: &[&str] = &["R45.2", "R45.0", "G47.00", "R63.0", "R41.840", "F32.9"];

/// Label pool for an insight kind
fn labels(kind: InsightKind) -> &'static [&'static str] {
    match kind {
        InsightKind::SymptomSegment => SYMPTOM_SEGMENTS,
        InsightKind::Diagnosis => DIAGNOSES,
        InsightKind::DiagnosticCategory => DIAGNOSTIC_CATEGORIES,
        InsightKind::SymptomId => SYMPTOM_IDS,
        InsightKind::HrsnProblem => DEFAULT_HRSN_CATEGORIES,
    }
}

fn synthetic_patient(rng: &mut StdRng, id: &str) -> PatientRecord {
    let mut patient = PatientRecord::new(id).with_age(rng.random_range(0..=95));

    if let Some(zip) = ZIP_CODES.choose(rng) {
        patient = patient.with_zip(*zip);
    }
    for (attribute, values) in [
        (Demographic::Gender, GENDERS),
        (Demographic::Race, RACES),
        (Demographic::Ethnicity, ETHNICITIES),
    ] {
        // Roughly one in ten values is missing
        if rng.random_bool(0.9) {
            if let Some(value) = values.choose(rng) {
                patient = patient.with_demographic(attribute, value);
            }
        }
    }
    for category in DEFAULT_HRSN_CATEGORIES {
        match rng.random_range(0..10) {
            0..=1 => patient = patient.with_hrsn(category, HrsnAnswer::Yes),
            2..=7 => patient = patient.with_hrsn(category, HrsnAnswer::No),
            _ => {}
        }
    }
    patient
}

/// Generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticPopulation {
    /// Number of patients
    pub size: usize,
    /// Seed for reproducible output; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl SyntheticPopulation {
    /// Settings for `size` patients with a random seed
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size, seed: None }
    }

    /// Use a fixed seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate patients and insights
    #[must_use]
    pub fn generate(&self) -> (Vec<PatientRecord>, Vec<InsightRecord>) {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut patients = Vec::with_capacity(self.size);
        let mut insights = Vec::new();

        for i in 0..self.size {
            let id = format!("P{:06}", i + 1);
            let patient = synthetic_patient(&mut rng, &id);

            let insight_count = rng.random_range(0..=4);
            for _ in 0..insight_count {
                let kind = InsightKind::ALL[rng.random_range(0..InsightKind::ALL.len())];
                if let Some(label) = labels(kind).choose(&mut rng) {
                    insights.push(
                        InsightRecord::new(id.clone(), kind, label)
                            .with_count(rng.random_range(1..=3)),
                    );
                }
            }

            patients.push(patient);
        }

        info!(
            "Generated synthetic population of {} patients with {} insights",
            patients.len(),
            insights.len()
        );
        (patients, insights)
    }

    /// Generate a snapshot
    #[must_use]
    pub fn snapshot(&self) -> RecordSnapshot {
        let (patients, insights) = self.generate();
        RecordSnapshot::new(patients, insights)
    }
}
