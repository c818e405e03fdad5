//! Patient record model
//!
//! One record per individual: demographics, ZIP code and structured HRSN
//! screening answers. Records are immutable once loaded.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::RawRecord;
use crate::models::types::{Demographic, HrsnAnswer, age_band};
use crate::normalize::{FieldAliases, RecordField, ZipCode, normalize_label_opt, normalize_zip};

/// A patient in the loaded population
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRecord {
    /// Patient identifier (joins insights to patients)
    pub id: String,
    /// Age in years
    pub age: Option<u32>,
    /// Explicit age range label, when the source provides one
    pub age_range: Option<String>,
    /// Gender
    pub gender: Option<String>,
    /// Race
    pub race: Option<String>,
    /// Ethnicity
    pub ethnicity: Option<String>,
    /// ZIP code as supplied
    pub raw_zip: Option<String>,
    /// Canonical ZIP code, absent when missing or malformed
    pub zip: Option<ZipCode>,
    /// Structured HRSN answers keyed by category
    pub hrsn: BTreeMap<String, HrsnAnswer>,
}

impl PatientRecord {
    /// Create a patient with only an identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            age: None,
            age_range: None,
            gender: None,
            race: None,
            ethnicity: None,
            raw_zip: None,
            zip: None,
            hrsn: BTreeMap::new(),
        }
    }

    /// Set the raw ZIP code, normalizing it
    #[must_use]
    pub fn with_zip(mut self, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        self.zip = normalize_zip(&raw);
        self.raw_zip = Some(raw);
        self
    }

    /// Set the age in years
    #[must_use]
    pub const fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Set a demographic attribute
    #[must_use]
    pub fn with_demographic(mut self, attribute: Demographic, value: impl AsRef<str>) -> Self {
        let value = normalize_label_opt(value.as_ref());
        match attribute {
            Demographic::AgeRange => self.age_range = value,
            Demographic::Gender => self.gender = value,
            Demographic::Race => self.race = value,
            Demographic::Ethnicity => self.ethnicity = value,
        }
        self
    }

    /// Record a structured HRSN answer
    #[must_use]
    pub fn with_hrsn(mut self, category: impl AsRef<str>, answer: HrsnAnswer) -> Self {
        if let Some(category) = normalize_label_opt(category.as_ref()) {
            self.hrsn.insert(category, answer);
        }
        self
    }

    /// Build a patient from a loosely typed record
    ///
    /// Missing fields stay absent. A record without an identifier gets a
    /// positional one (`row-<n>`) so it still counts in population totals.
    #[must_use]
    pub fn from_raw(
        raw: &RawRecord,
        aliases: &FieldAliases,
        hrsn_categories: &[String],
        row: usize,
    ) -> Self {
        let id = aliases
            .text(raw, RecordField::PatientId)
            .unwrap_or_else(|| format!("row-{row}"));

        let mut patient = Self::new(id);
        if let Some(zip) = aliases.text(raw, RecordField::Zip) {
            patient = patient.with_zip(zip);
        }
        patient.age = aliases
            .text(raw, RecordField::Age)
            .and_then(|age| parse_age(&age));

        let text = |field| {
            aliases
                .text(raw, field)
                .and_then(|value| normalize_label_opt(&value))
        };
        patient.age_range = text(RecordField::AgeRange);
        patient.gender = text(RecordField::Gender);
        patient.race = text(RecordField::Race);
        patient.ethnicity = text(RecordField::Ethnicity);

        for category in hrsn_categories {
            if let Some(answer) = raw.get(category).and_then(HrsnAnswer::from_value) {
                patient.hrsn.insert(category.clone(), answer);
            }
        }

        patient
    }

    /// Value of a demographic attribute
    ///
    /// The age range falls back to a band derived from the numeric age.
    #[must_use]
    pub fn demographic(&self, attribute: Demographic) -> Option<&str> {
        match attribute {
            Demographic::AgeRange => self
                .age_range
                .as_deref()
                .or_else(|| self.age.map(age_band)),
            Demographic::Gender => self.gender.as_deref(),
            Demographic::Race => self.race.as_deref(),
            Demographic::Ethnicity => self.ethnicity.as_deref(),
        }
    }

    /// Structured answer for an HRSN category
    #[must_use]
    pub fn hrsn_answer(&self, category: &str) -> Option<HrsnAnswer> {
        self.hrsn.get(category).copied()
    }

    /// HRSN categories answered `Yes`
    pub fn hrsn_needs(&self) -> impl Iterator<Item = &str> {
        self.hrsn
            .iter()
            .filter(|(_, answer)| **answer == HrsnAnswer::Yes)
            .map(|(category, _)| category.as_str())
    }
}

fn parse_age(raw: &str) -> Option<u32> {
    let age = raw.trim().parse::<f64>().ok()?;
    if age.is_finite() && (0.0..=150.0).contains(&age) {
        Some(age.floor() as u32)
    } else {
        None
    }
}
