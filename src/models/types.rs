//! Common domain type definitions
//!
//! Enum types shared by the record models, the filter resolver and the
//! aggregators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of an extracted insight, one per filter criteria group
///
/// The declaration order is the fixed criteria group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Symptom segment
    #[serde(alias = "symptom_segments", alias = "Symptom Segments")]
    SymptomSegment,
    /// Diagnosis
    #[serde(alias = "diagnoses", alias = "Diagnoses")]
    Diagnosis,
    /// Diagnostic category
    #[serde(alias = "diagnostic_categories", alias = "Diagnostic Categories")]
    DiagnosticCategory,
    /// Symptom identifier / code
    #[serde(alias = "symptom_ids", alias = "Symptom IDs")]
    SymptomId,
    /// Health-related social need problem
    #[serde(alias = "hrsn_problems", alias = "HRSN Problems")]
    HrsnProblem,
}

impl InsightKind {
    /// All kinds in criteria group order
    pub const ALL: [Self; 5] = [
        Self::SymptomSegment,
        Self::Diagnosis,
        Self::DiagnosticCategory,
        Self::SymptomId,
        Self::HrsnProblem,
    ];

    /// Position of this kind in the criteria group order
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::SymptomSegment => 0,
            Self::Diagnosis => 1,
            Self::DiagnosticCategory => 2,
            Self::SymptomId => 3,
            Self::HrsnProblem => 4,
        }
    }

    /// Display name of the criteria group for this kind
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::SymptomSegment => "Symptom Segments",
            Self::Diagnosis => "Diagnoses",
            Self::DiagnosticCategory => "Diagnostic Categories",
            Self::SymptomId => "Symptom IDs",
            Self::HrsnProblem => "HRSN Problems",
        }
    }

    /// Parse a loosely written kind name
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "symptomsegment" | "symptomsegments" | "segment" => Some(Self::SymptomSegment),
            "diagnosis" | "diagnoses" => Some(Self::Diagnosis),
            "diagnosticcategory" | "diagnosticcategories" | "diagnosiscategory" => {
                Some(Self::DiagnosticCategory)
            }
            "symptomid" | "symptomids" | "symptomcode" | "symptom" => Some(Self::SymptomId),
            "hrsn" | "hrsnproblem" | "hrsnproblems" => Some(Self::HrsnProblem),
            _ => None,
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Structured answer to an HRSN screening question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HrsnAnswer {
    /// Need present
    Yes,
    /// Need absent
    No,
}

impl HrsnAnswer {
    /// Label used in breakdowns
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parse a loosely typed answer; anything unrecognised is absent
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(true) => Some(Self::Yes),
            serde_json::Value::Bool(false) => Some(Self::No),
            serde_json::Value::String(s) => match s.trim().to_lowercase().as_str() {
                "yes" | "y" | "true" => Some(Self::Yes),
                "no" | "n" | "false" => Some(Self::No),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Where a reconciled count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Counted from structured patient fields only
    StructuredOnly,
    /// Counted from extracted insights only
    ExtractedOnly,
    /// Both sources contributed
    DualSource,
    /// Requested, but neither source has any record
    NoData,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StructuredOnly => "structured-only",
            Self::ExtractedOnly => "extracted-only",
            Self::DualSource => "dual-source",
            Self::NoData => "no-data",
        };
        f.write_str(label)
    }
}

/// Demographic attributes available on a patient record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demographic {
    /// Age range (explicit or derived from age)
    AgeRange,
    /// Gender
    Gender,
    /// Race
    Race,
    /// Ethnicity
    Ethnicity,
}

impl Demographic {
    /// All demographic attributes in report order
    pub const ALL: [Self; 4] = [Self::AgeRange, Self::Gender, Self::Race, Self::Ethnicity];

    /// Display name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AgeRange => "Age Range",
            Self::Gender => "Gender",
            Self::Race => "Race",
            Self::Ethnicity => "Ethnicity",
        }
    }
}

/// Age bands used when only a numeric age is known
pub const AGE_BANDS: &[(u32, u32, &str)] = &[
    (0, 17, "0-17"),
    (18, 29, "18-29"),
    (30, 44, "30-44"),
    (45, 64, "45-64"),
    (65, u32::MAX, "65+"),
];

/// Age band label for an age in years
#[must_use]
pub fn age_band(age: u32) -> &'static str {
    AGE_BANDS
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&age))
        .map_or("65+", |(_, _, label)| *label)
}
