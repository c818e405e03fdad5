//! Field alias table
//!
//! Upstream records are loosely typed key/value maps whose keys drift between
//! producers (`zip_code`, `zipCode`, `zip`, ...). Each logical field has an
//! ordered list of aliases; the first present value wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::RawRecord;

/// Logical record fields read through the alias table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// Patient identifier on a patient record
    PatientId,
    /// Raw ZIP code
    Zip,
    /// Numeric age in years
    Age,
    /// Pre-bucketed age range label
    AgeRange,
    /// Gender
    Gender,
    /// Race
    Race,
    /// Ethnicity
    Ethnicity,
    /// Patient identifier on an insight record
    InsightPatientId,
    /// Insight kind (long-form insight rows)
    InsightKind,
    /// Insight label (long-form insight rows)
    InsightLabel,
    /// Insight count or weight
    InsightCount,
    /// Symptom segment column (wide-form insight rows)
    SymptomSegment,
    /// Diagnosis column (wide-form insight rows)
    Diagnosis,
    /// Diagnostic category column (wide-form insight rows)
    DiagnosticCategory,
    /// Symptom code column (wide-form insight rows)
    SymptomId,
    /// HRSN problem column (wide-form insight rows)
    HrsnProblem,
}

/// Default aliases, in lookup order
pub const DEFAULT_FIELD_ALIASES: &[(RecordField, &[&str])] = &[
    (RecordField::PatientId, &["patient_id", "patientId", "id", "mrn"]),
    (RecordField::Zip, &["zip_code", "zipCode", "zip", "postal_code"]),
    (RecordField::Age, &["age", "age_years"]),
    (RecordField::AgeRange, &["age_range", "ageRange", "age_group"]),
    (RecordField::Gender, &["gender", "sex"]),
    (RecordField::Race, &["race"]),
    (RecordField::Ethnicity, &["ethnicity"]),
    (RecordField::InsightPatientId, &["patient_id", "patientId", "patient", "mrn"]),
    (RecordField::InsightKind, &["kind", "category_type", "type"]),
    (RecordField::InsightLabel, &["label", "category", "value", "name"]),
    (RecordField::InsightCount, &["count", "weight", "occurrences"]),
    (RecordField::SymptomSegment, &["symptom_segment", "symptomSegment", "segment"]),
    (RecordField::Diagnosis, &["diagnosis", "diagnosis_name"]),
    (
        RecordField::DiagnosticCategory,
        &["diagnostic_category", "diagnosticCategory", "diagnosis_category"],
    ),
    (RecordField::SymptomId, &["symptom_id", "symptomId", "symptom_code"]),
    (RecordField::HrsnProblem, &["hrsn_problem", "hrsnProblem", "hrsn"]),
];

/// Aliases for one logical field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAlias {
    /// The logical field
    pub field: RecordField,
    /// Raw keys to try, in order
    pub aliases: Vec<String>,
}

/// Declarative alias table consulted when reading raw records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAliases {
    entries: Vec<FieldAlias>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            entries: DEFAULT_FIELD_ALIASES
                .iter()
                .map(|(field, aliases)| FieldAlias {
                    field: *field,
                    aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl FieldAliases {
    /// Aliases configured for a field
    #[must_use]
    pub fn aliases(&self, field: RecordField) -> &[String] {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.aliases.as_slice())
            .unwrap_or_default()
    }

    /// Append an alias for a field (tried after the existing ones)
    #[must_use]
    pub fn with_alias(mut self, field: RecordField, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        match self.entries.iter_mut().find(|entry| entry.field == field) {
            Some(entry) => entry.aliases.push(alias),
            None => self.entries.push(FieldAlias {
                field,
                aliases: vec![alias],
            }),
        }
        self
    }

    /// First present, non-null, non-blank value for a field
    #[must_use]
    pub fn lookup<'a>(&self, record: &'a RawRecord, field: RecordField) -> Option<&'a Value> {
        self.aliases(field)
            .iter()
            .filter_map(|alias| record.get(alias))
            .find(|value| !is_blank(value))
    }

    /// Field value as text; numbers are rendered, strings are trimmed
    #[must_use]
    pub fn text(&self, record: &RawRecord, field: RecordField) -> Option<String> {
        self.lookup(record, field).and_then(value_as_text)
    }
}

/// Render a scalar JSON value as text
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
