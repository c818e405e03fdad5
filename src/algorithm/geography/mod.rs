//! Geographic estimation
//!
//! Turns a filtered population into one bin per ZIP code with totals,
//! estimated affected counts, a bucket index and the predominant
//! demographic attribute.

pub mod buckets;
pub mod estimator;
pub mod predominant;

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::DEFAULT_BUCKET_LEVELS;
use crate::models::PatientRecord;
use crate::normalize::ZipCode;

pub use buckets::BucketScale;
pub use estimator::{AffectedRate, estimate_affected};
pub use predominant::{MIXED, PREDOMINANT_ATTRIBUTES, predominant_attribute};

/// Display-ready statistics for one ZIP code
///
/// `estimated_affected` is a proportional estimate. A region with patients
/// is shown with at least one affected patient whenever the population-wide
/// rate is nonzero, which overstates small regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeographicBin {
    /// Canonical ZIP code
    pub zip: ZipCode,
    /// Patients in the region
    pub total: u64,
    /// Estimated affected patients, 0 without a focus category
    pub estimated_affected: u64,
    /// Colour-intensity index in `0..levels`
    pub bucket: u8,
    /// Predominant demographic value or `Mixed`
    pub predominant: String,
}

/// Builds geographic bins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeographicEstimator {
    levels: u8,
}

impl Default for GeographicEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_LEVELS)
    }
}

impl GeographicEstimator {
    /// Estimator with `levels` bucket indices
    #[must_use]
    pub const fn new(levels: u8) -> Self {
        Self { levels }
    }

    /// One bin per ZIP present in the population, largest region first
    ///
    /// With a focus rate, regions are bucketed by their estimated affected
    /// count; otherwise by their total. Patients without a usable ZIP are
    /// skipped.
    #[must_use]
    pub fn bins(&self, patients: &[&PatientRecord], focus: Option<AffectedRate>) -> Vec<GeographicBin> {
        let mut order: Vec<&ZipCode> = Vec::new();
        let mut regions: FxHashMap<&ZipCode, Vec<&PatientRecord>> = FxHashMap::default();
        for patient in patients {
            if let Some(zip) = patient.zip.as_ref() {
                regions
                    .entry(zip)
                    .or_insert_with(|| {
                        order.push(zip);
                        Vec::new()
                    })
                    .push(patient);
            }
        }

        let partial: Vec<(ZipCode, u64, u64, String)> = order
            .into_iter()
            .map(|zip| {
                let members = regions.get(zip).map(Vec::as_slice).unwrap_or_default();
                let total = members.len() as u64;
                let estimated = focus.map_or(0, |rate| estimate_affected(total, rate));
                (zip.clone(), total, estimated, predominant_attribute(members))
            })
            .collect();

        let bucketed_value = |total: u64, estimated: u64| {
            if focus.is_some() { estimated } else { total }
        };
        let scale = BucketScale::fitted(
            self.levels,
            partial
                .iter()
                .map(|(_, total, estimated, _)| bucketed_value(*total, *estimated)),
        );

        debug!(
            "Built {} geographic bins with bucket scale max {}",
            partial.len(),
            scale.max()
        );

        partial
            .into_iter()
            .map(|(zip, total, estimated_affected, predominant)| GeographicBin {
                bucket: scale.bucket_for(bucketed_value(total, estimated_affected)),
                zip,
                total,
                estimated_affected,
                predominant,
            })
            .sorted_by(|a, b| b.total.cmp(&a.total))
            .collect()
    }
}
