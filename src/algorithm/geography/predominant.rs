//! Predominant demographic attribute of a region

use crate::algorithm::aggregation::CategoryCounts;
use crate::models::{Demographic, PatientRecord};
use crate::normalize::UNKNOWN;

/// Label used when no value covers at least half of a region
pub const MIXED: &str = "Mixed";

/// Attributes consulted, in order of preference
pub const PREDOMINANT_ATTRIBUTES: [Demographic; 3] =
    [Demographic::AgeRange, Demographic::Race, Demographic::Ethnicity];

/// Most frequent known value of an attribute; ties go to the first seen
fn most_frequent(patients: &[&PatientRecord], attribute: Demographic) -> Option<(String, u64)> {
    let counts = CategoryCounts::from_values(
        patients
            .iter()
            .filter_map(|patient| patient.demographic(attribute))
            .filter(|value| *value != UNKNOWN),
    );
    counts
        .iter()
        .fold(None::<(&str, u64)>, |best, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, count)| (value.to_string(), count))
}

/// Predominant attribute label for the patients of one region
///
/// The first attribute whose most frequent known value covers at least half
/// of the region wins. Otherwise the region is `Mixed`.
#[must_use]
pub fn predominant_attribute(patients: &[&PatientRecord]) -> String {
    let region_total = patients.len() as u64;
    if region_total == 0 {
        return MIXED.to_string();
    }
    PREDOMINANT_ATTRIBUTES
        .iter()
        .filter_map(|attribute| most_frequent(patients, *attribute))
        .find(|(_, count)| count * 2 >= region_total)
        .map_or_else(|| MIXED.to_string(), |(value, _)| value)
}
