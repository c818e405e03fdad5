//! Insight record model
//!
//! One record per NLP-extracted clinical finding, linked to a patient by
//! identifier.

use serde::Serialize;

use crate::models::RawRecord;
use crate::models::types::InsightKind;
use crate::normalize::{FieldAliases, RecordField, normalize_label_opt};

/// Wide-form columns and the insight kind each one carries
const WIDE_COLUMNS: [(RecordField, InsightKind); 5] = [
    (RecordField::SymptomSegment, InsightKind::SymptomSegment),
    (RecordField::Diagnosis, InsightKind::Diagnosis),
    (RecordField::DiagnosticCategory, InsightKind::DiagnosticCategory),
    (RecordField::SymptomId, InsightKind::SymptomId),
    (RecordField::HrsnProblem, InsightKind::HrsnProblem),
];

/// An extracted finding for one patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightRecord {
    /// Identifier of the patient this finding belongs to
    pub patient_id: String,
    /// Which criteria group the label belongs to
    pub kind: InsightKind,
    /// Normalized category label
    pub label: String,
    /// Count or weight of the finding
    pub count: u64,
}

impl InsightRecord {
    /// Create an insight with a count of one
    #[must_use]
    pub fn new(patient_id: impl Into<String>, kind: InsightKind, label: impl AsRef<str>) -> Self {
        Self {
            patient_id: patient_id.into(),
            kind,
            label: normalize_label_opt(label.as_ref()).unwrap_or_default(),
            count: 1,
        }
    }

    /// Set the count or weight
    #[must_use]
    pub const fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Build insights from a loosely typed record
    ///
    /// Long-form rows carry a kind and a label; wide-form rows carry one
    /// column per kind and expand to one insight per populated column.
    /// Rows without a patient identifier cannot be linked and yield nothing.
    #[must_use]
    pub fn from_raw(raw: &RawRecord, aliases: &FieldAliases) -> Vec<Self> {
        let Some(patient_id) = aliases.text(raw, RecordField::InsightPatientId) else {
            return Vec::new();
        };
        let count = aliases
            .text(raw, RecordField::InsightCount)
            .map_or(1, |count| parse_count(&count));

        let long_form = aliases
            .text(raw, RecordField::InsightKind)
            .and_then(|kind| InsightKind::parse(&kind))
            .zip(
                aliases
                    .text(raw, RecordField::InsightLabel)
                    .and_then(|label| normalize_label_opt(&label)),
            );

        if let Some((kind, label)) = long_form {
            return vec![Self {
                patient_id,
                kind,
                label,
                count,
            }];
        }

        WIDE_COLUMNS
            .iter()
            .filter_map(|(field, kind)| {
                let label = aliases
                    .text(raw, *field)
                    .and_then(|label| normalize_label_opt(&label))?;
                Some(Self {
                    patient_id: patient_id.clone(),
                    kind: *kind,
                    label,
                    count,
                })
            })
            .collect()
    }
}

/// Parse a count; non-numeric or non-positive counts become one
fn parse_count(raw: &str) -> u64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => value.round() as u64,
        _ => 1,
    }
}
